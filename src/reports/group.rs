//! Group Analysis
//!
//! One group's report from a single member's point of view: their balance,
//! their share of the spending, who owes them and whom they owe.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

use crate::display::report::{double_separator, separator};
use crate::display::{format_category_table, format_debt_table};
use crate::models::{Amount, GroupId, LedgerSnapshot, MemberId};
use crate::services::{compute_balances, resolve_debts, CategoryTotals, Debt};

/// Label shown for expenses recorded without a category
pub const UNCATEGORIZED: &str = "uncategorized";

const WIDTH: usize = 60;

/// Per-group report for one observing member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAnalysis {
    pub group_id: GroupId,
    pub group_name: String,

    /// Observer's net balance in this group
    #[serde(rename = "myBalance")]
    pub observer_balance: Amount,

    pub total_spent: Amount,

    /// Even share of the total spend per member
    #[serde(rename = "myTotalSpent")]
    pub observer_share: Amount,

    /// Members who owe the observer
    #[serde(rename = "owedBy")]
    pub owed_by_others: Vec<Debt>,

    /// Members the observer owes
    #[serde(rename = "oweTo")]
    pub owed_to_others: Vec<Debt>,

    #[serde(rename = "categorySummary", serialize_with = "sorted_map")]
    pub category_totals: CategoryTotals,
}

/// One category's slice of a group's spending
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Amount,
    /// Share of the total spend, 0-100
    pub percentage: f64,
}

/// Serialize a hash map with its keys in order so exports are stable
pub(crate) fn sorted_map<S: Serializer>(
    map: &HashMap<String, Amount>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    map.iter()
        .collect::<BTreeMap<_, _>>()
        .serialize(serializer)
}

impl GroupAnalysis {
    /// Build the analysis of `snapshot` as seen by `observer`
    pub fn build(snapshot: &LedgerSnapshot, observer: &MemberId) -> Self {
        let sheet = compute_balances(snapshot);
        let debts = resolve_debts(&sheet.balances, observer);

        let member_count = snapshot.member_count();
        let observer_share = if member_count == 0 {
            Amount::zero()
        } else {
            sheet.total_spent / member_count
        };

        tracing::debug!(
            group = %snapshot.group_id,
            observer = %observer,
            members = member_count,
            expenses = snapshot.expenses.len(),
            payments = snapshot.payments.len(),
            "built group analysis"
        );

        Self {
            group_id: snapshot.group_id.clone(),
            group_name: snapshot.name.clone(),
            observer_balance: sheet.balance_of(observer),
            total_spent: sheet.total_spent,
            observer_share,
            owed_by_others: debts.owed_by_others,
            owed_to_others: debts.owed_to_others,
            category_totals: sheet.category_totals,
        }
    }

    /// Total the observer is owed in this group
    pub fn total_owed_to_observer(&self) -> Amount {
        self.owed_by_others.iter().map(|d| d.amount).sum()
    }

    /// Total the observer owes in this group
    pub fn total_owed_by_observer(&self) -> Amount {
        self.owed_to_others.iter().map(|d| d.amount).sum()
    }

    /// Categories by spend, largest first
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        category_breakdown(&self.category_totals, self.total_spent)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Group: {} ({})\n", self.group_name, self.group_id));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Total spent:",
            self.total_spent.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Your share:",
            self.observer_share.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Your balance:",
            self.observer_balance.format_with_symbol(symbol)
        ));

        output.push_str("\nOwed to you\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format_debt_table(&self.owed_by_others, symbol));
        output.push('\n');

        output.push_str("\nYou owe\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format_debt_table(&self.owed_to_others, symbol));
        output.push('\n');

        output.push_str("\nSpending by category\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format_category_table(&self.category_breakdown(), symbol));
        output.push('\n');

        output
    }
}

/// Merge blank labels into [`UNCATEGORIZED`] and rank categories by total
pub fn category_breakdown(totals: &CategoryTotals, total_spent: Amount) -> Vec<CategoryShare> {
    let mut merged: BTreeMap<&str, Amount> = BTreeMap::new();
    for (category, total) in totals {
        let label = match category.trim() {
            "" => UNCATEGORIZED,
            label => label,
        };
        *merged.entry(label).or_default() += *total;
    }

    let mut shares: Vec<CategoryShare> = merged
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            percentage: if total_spent.is_positive() {
                total.value() / total_spent.value() * 100.0
            } else {
                0.0
            },
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total
            .value()
            .total_cmp(&a.total.value())
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Payment};

    fn m(id: &str) -> MemberId {
        MemberId::from(id)
    }

    fn expense(payer: &str, value: f64, category: &str) -> Expense {
        Expense::new(GroupId::from("g1"), m(payer), Amount::new(value), category)
    }

    fn trip() -> LedgerSnapshot {
        LedgerSnapshot::new(GroupId::from("g1"), "Trip")
            .with_members(["x", "y", "z"])
            .with_expense(expense("x", 90.0, "food"))
            .with_expense(expense("y", 30.0, "transport"))
    }

    #[test]
    fn test_build_creditor_view() {
        let analysis = GroupAnalysis::build(&trip(), &m("x"));

        assert_eq!(analysis.group_id.as_str(), "g1");
        assert_eq!(analysis.group_name, "Trip");
        assert_eq!(analysis.observer_balance, Amount::new(50.0));
        assert_eq!(analysis.total_spent, Amount::new(120.0));
        assert_eq!(analysis.observer_share, Amount::new(40.0));
        assert_eq!(
            analysis.owed_by_others,
            vec![
                Debt::new(m("z"), Amount::new(40.0)),
                Debt::new(m("y"), Amount::new(10.0)),
            ]
        );
        assert!(analysis.owed_to_others.is_empty());
        assert_eq!(analysis.total_owed_to_observer(), Amount::new(50.0));
    }

    #[test]
    fn test_build_debtor_view() {
        let analysis = GroupAnalysis::build(&trip(), &m("z"));

        assert_eq!(analysis.observer_balance, Amount::new(-40.0));
        assert_eq!(
            analysis.owed_to_others,
            vec![Debt::new(m("x"), Amount::new(40.0))]
        );
        assert_eq!(analysis.total_owed_by_observer(), Amount::new(40.0));
    }

    #[test]
    fn test_build_empty_group() {
        let snapshot = LedgerSnapshot::new(GroupId::from("g0"), "Nobody")
            .with_expense(expense("x", 10.0, "food"));
        let analysis = GroupAnalysis::build(&snapshot, &m("x"));

        assert_eq!(analysis.observer_balance, Amount::zero());
        assert_eq!(analysis.total_spent, Amount::zero());
        assert_eq!(analysis.observer_share, Amount::zero());
        assert!(analysis.category_totals.is_empty());
    }

    #[test]
    fn test_settled_group_has_no_debts() {
        let snapshot = LedgerSnapshot::new(GroupId::from("g1"), "Pair")
            .with_members(["x", "y"])
            .with_expense(expense("x", 100.0, "food"))
            .with_payment(Payment::new(
                GroupId::from("g1"),
                m("y"),
                m("x"),
                Amount::new(50.0),
            ));

        for observer in ["x", "y"] {
            let analysis = GroupAnalysis::build(&snapshot, &m(observer));
            assert_eq!(analysis.observer_balance, Amount::zero());
            assert!(analysis.owed_by_others.is_empty());
            assert!(analysis.owed_to_others.is_empty());
        }
    }

    #[test]
    fn test_category_breakdown_order_and_percentages() {
        let analysis = GroupAnalysis::build(&trip(), &m("x"));
        let shares = analysis.category_breakdown();

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "food");
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].category, "transport");
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn test_category_breakdown_merges_blank_labels() {
        let totals: CategoryTotals = [
            (String::new(), Amount::new(5.0)),
            ("  ".to_string(), Amount::new(5.0)),
            ("food".to_string(), Amount::new(10.0)),
        ]
        .into_iter()
        .collect();

        let shares = category_breakdown(&totals, Amount::new(20.0));
        assert_eq!(shares.len(), 2);
        // equal totals fall back to name order
        assert_eq!(shares[0].category, "food");
        assert_eq!(shares[1].category, UNCATEGORIZED);
        assert_eq!(shares[1].total, Amount::new(10.0));
    }

    #[test]
    fn test_category_breakdown_with_zero_spend() {
        let totals: CategoryTotals = [("food".to_string(), Amount::zero())].into_iter().collect();
        let shares = category_breakdown(&totals, Amount::zero());
        assert_eq!(shares[0].percentage, 0.0);
    }

    #[test]
    fn test_serializes_front_end_field_names() {
        let json = serde_json::to_value(GroupAnalysis::build(&trip(), &m("x"))).unwrap();

        assert_eq!(json["groupId"], "g1");
        assert_eq!(json["groupName"], "Trip");
        assert_eq!(json["myBalance"], 50.0);
        assert_eq!(json["myTotalSpent"], 40.0);
        assert_eq!(json["owedBy"][0]["userId"], "z");
        assert_eq!(json["categorySummary"]["food"], 90.0);
        assert!(json["oweTo"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_serialized_categories_are_sorted() {
        let json = serde_json::to_string(&GroupAnalysis::build(&trip(), &m("x"))).unwrap();
        let food = json.find("\"food\"").unwrap();
        let transport = json.find("\"transport\"").unwrap();
        assert!(food < transport);
    }

    #[test]
    fn test_format_terminal() {
        let output = GroupAnalysis::build(&trip(), &m("x")).format_terminal("$");
        assert!(output.contains("Group: Trip (g1)"));
        assert!(output.contains("$120.00"));
        assert!(output.contains("$50.00"));
        assert!(output.contains("Owed to you"));
        assert!(output.contains("food"));
    }
}
