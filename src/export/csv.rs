//! CSV Export functionality
//!
//! Flattens an analysis into one row per line item so it can be opened in a
//! spreadsheet: balances, shares, individual debts and category totals.

use serde::Serialize;
use std::io::Write;

use crate::error::LedgerResult;
use crate::reports::{AggregateAnalysis, GroupAnalysis};

/// Group column value for rows that span every group
pub const ALL_GROUPS: &str = "all";

/// What a CSV row describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Balance,
    Share,
    OwedBy,
    OweTo,
    Category,
    TotalSpent,
}

/// One exported line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub group: String,
    pub kind: RowKind,
    pub counterparty: String,
    pub category: String,
    pub amount: String,
}

impl CsvRow {
    fn new(group: &str, kind: RowKind, amount: impl ToString) -> Self {
        Self {
            group: group.to_string(),
            kind,
            counterparty: String::new(),
            category: String::new(),
            amount: amount.to_string(),
        }
    }

    fn counterparty(mut self, counterparty: impl ToString) -> Self {
        self.counterparty = counterparty.to_string();
        self
    }

    fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Anything that can be flattened into CSV rows
pub trait CsvRows {
    fn csv_rows(&self) -> Vec<CsvRow>;
}

impl CsvRows for GroupAnalysis {
    fn csv_rows(&self) -> Vec<CsvRow> {
        let group = self.group_id.as_str();
        let mut rows = vec![
            CsvRow::new(group, RowKind::Balance, self.observer_balance),
            CsvRow::new(group, RowKind::TotalSpent, self.total_spent),
            CsvRow::new(group, RowKind::Share, self.observer_share),
        ];

        rows.extend(self.owed_by_others.iter().map(|debt| {
            CsvRow::new(group, RowKind::OwedBy, debt.amount).counterparty(&debt.counterparty_id)
        }));
        rows.extend(self.owed_to_others.iter().map(|debt| {
            CsvRow::new(group, RowKind::OweTo, debt.amount).counterparty(&debt.counterparty_id)
        }));
        rows.extend(
            self.category_breakdown()
                .into_iter()
                .map(|share| CsvRow::new(group, RowKind::Category, share.total).category(share.category)),
        );

        rows
    }
}

impl CsvRows for AggregateAnalysis {
    fn csv_rows(&self) -> Vec<CsvRow> {
        let mut rows = vec![
            CsvRow::new(ALL_GROUPS, RowKind::Balance, self.total_balance),
            CsvRow::new(ALL_GROUPS, RowKind::TotalSpent, self.total_spent()),
            CsvRow::new(ALL_GROUPS, RowKind::OwedBy, self.total_owed_to_observer),
            CsvRow::new(ALL_GROUPS, RowKind::OweTo, self.total_owed_by_observer),
        ];

        rows.extend(self.category_breakdown().into_iter().map(|share| {
            CsvRow::new(ALL_GROUPS, RowKind::Category, share.total).category(share.category)
        }));

        rows
    }
}

/// Write an analysis as CSV, header row first
pub fn export_csv<T, W>(report: &T, writer: W) -> LedgerResult<()>
where
    T: CsvRows + ?Sized,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in report.csv_rows() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Expense, GroupId, LedgerSnapshot, MemberId};

    fn analysis() -> GroupAnalysis {
        let g = GroupId::from("g1");
        let snapshot = LedgerSnapshot::new(g.clone(), "Trip")
            .with_members(["x", "y", "z"])
            .with_expense(Expense::new(g.clone(), MemberId::from("x"), Amount::new(90.0), "food"))
            .with_expense(Expense::new(g, MemberId::from("y"), Amount::new(30.0), "transport"));
        GroupAnalysis::build(&snapshot, &MemberId::from("x"))
    }

    fn export(report: &impl CsvRows) -> String {
        let mut out = Vec::new();
        export_csv(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_group_csv() {
        let csv = export(&analysis());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "group,kind,counterparty,category,amount");
        assert_eq!(lines[1], "g1,balance,,,50.00");
        assert_eq!(lines[2], "g1,total_spent,,,120.00");
        assert_eq!(lines[3], "g1,share,,,40.00");
        assert_eq!(lines[4], "g1,owed_by,z,,40.00");
        assert_eq!(lines[5], "g1,owed_by,y,,10.00");
        assert_eq!(lines[6], "g1,category,,food,90.00");
        assert_eq!(lines[7], "g1,category,,transport,30.00");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_aggregate_csv() {
        let aggregate = AggregateAnalysis::build(&[analysis()]);
        let csv = export(&aggregate);

        assert!(csv.contains("all,balance,,,50.00"));
        assert!(csv.contains("all,owed_by,,,50.00"));
        assert!(csv.contains("all,owe_to,,,0.00"));
        assert!(csv.contains("all,category,,food,90.00"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let g = GroupId::from("g1");
        let snapshot = LedgerSnapshot::new(g.clone(), "Trip")
            .with_members(["x"])
            .with_expense(Expense::new(g, MemberId::from("x"), Amount::new(5.0), "food, drinks"));
        let csv = export(&GroupAnalysis::build(&snapshot, &MemberId::from("x")));

        assert!(csv.contains("\"food, drinks\""));
    }
}
