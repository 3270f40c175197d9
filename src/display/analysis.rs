//! Table formatting for debts, balances and category breakdowns

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage, truncate};
use crate::models::{Amount, MemberId};
use crate::reports::CategoryShare;
use crate::services::{Debt, Settlement};

const NAME_WIDTH: usize = 32;
const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct DebtRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "From")]
    debtor: String,
    #[tabled(rename = "To")]
    creditor: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a list of debts as a two-column table
pub fn format_debt_table(debts: &[Debt], symbol: &str) -> String {
    if debts.is_empty() {
        return "  (none)".to_string();
    }

    render(
        debts
            .iter()
            .map(|d| DebtRow {
                member: truncate(d.counterparty_id.as_str(), NAME_WIDTH),
                amount: d.amount.format_with_symbol(symbol),
            })
            .collect(),
    )
}

/// Format member balances, expected already sorted
pub fn format_balance_table(balances: &[(&MemberId, Amount)], symbol: &str) -> String {
    if balances.is_empty() {
        return "No members.".to_string();
    }

    render(
        balances
            .iter()
            .map(|(member, balance)| {
                let rounded = balance.round_cents();
                BalanceRow {
                    member: truncate(member.as_str(), NAME_WIDTH),
                    balance: rounded.format_with_symbol(symbol),
                    status: if rounded.is_positive() {
                        "is owed"
                    } else if rounded.is_negative() {
                        "owes"
                    } else {
                        "settled"
                    },
                }
            })
            .collect(),
    )
}

/// Format a category breakdown with proportional bars
pub fn format_category_table(shares: &[CategoryShare], symbol: &str) -> String {
    if shares.is_empty() {
        return "No spending recorded.".to_string();
    }

    let max = shares
        .iter()
        .map(|s| s.total.value())
        .fold(0.0_f64, f64::max);

    render(
        shares
            .iter()
            .map(|s| CategoryRow {
                category: truncate(&s.category, NAME_WIDTH),
                total: s.total.format_with_symbol(symbol),
                percentage: format_percentage(s.percentage),
                bar: format_bar(s.total.value(), max, BAR_WIDTH),
            })
            .collect(),
    )
}

/// Format a full settlement plan
pub fn format_transfer_table(plan: &[Settlement], symbol: &str) -> String {
    if plan.is_empty() {
        return "Everyone is settled up.".to_string();
    }

    render(
        plan.iter()
            .map(|s| TransferRow {
                debtor: truncate(s.debtor.as_str(), NAME_WIDTH),
                creditor: truncate(s.creditor.as_str(), NAME_WIDTH),
                amount: s.amount.format_with_symbol(symbol),
            })
            .collect(),
    )
}
