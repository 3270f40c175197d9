//! Aggregate Analysis
//!
//! Folds a member's per-group analyses into one cross-group summary.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

use super::group::{category_breakdown, sorted_map, CategoryShare, GroupAnalysis};
use crate::display::format_category_table;
use crate::display::report::{double_separator, separator};
use crate::models::{Amount, LedgerSnapshot, MemberId};
use crate::services::CategoryTotals;

const WIDTH: usize = 60;

/// Cross-group totals for one observing member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateAnalysis {
    /// Sum of the observer's balance across groups
    pub total_balance: Amount,

    #[serde(rename = "totalOwedToMe")]
    pub total_owed_to_observer: Amount,

    #[serde(rename = "totalOwedByMe")]
    pub total_owed_by_observer: Amount,

    #[serde(rename = "categorySummary", serialize_with = "sorted_map")]
    pub category_totals: CategoryTotals,

    /// Number of groups folded in
    #[serde(default)]
    pub group_count: usize,
}

impl AggregateAnalysis {
    /// Fold a set of group analyses. An empty slice yields all zeros.
    pub fn build(analyses: &[GroupAnalysis]) -> Self {
        let mut aggregate = Self::default();
        for analysis in analyses {
            aggregate.absorb(analysis);
        }
        aggregate
    }

    fn absorb(&mut self, analysis: &GroupAnalysis) {
        self.total_balance += analysis.observer_balance;
        self.total_owed_to_observer += analysis.total_owed_to_observer();
        self.total_owed_by_observer += analysis.total_owed_by_observer();
        for (category, total) in &analysis.category_totals {
            *self.category_totals.entry(category.clone()).or_default() += *total;
        }
        self.group_count += 1;
    }

    /// Spend across every category, all groups combined
    pub fn total_spent(&self) -> Amount {
        self.category_totals.values().sum()
    }

    /// Categories by spend across all groups, largest first
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        category_breakdown(&self.category_totals, self.total_spent())
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary across {} group(s)\n", self.group_count));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        let rows = [
            ("Owed to you:", self.total_owed_to_observer),
            ("You owe:", self.total_owed_by_observer),
            ("Net balance:", self.total_balance),
        ];
        for (label, amount) in rows {
            output.push_str(&format!(
                "{:<28} {:>14}\n",
                label,
                amount.format_with_symbol(symbol)
            ));
        }

        output.push_str("\nSpending by category\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format_category_table(&self.category_breakdown(), symbol));
        output.push('\n');

        output
    }
}

/// Build one analysis per snapshot, in input order
///
/// Groups are independent, so with `parallel` set they are analyzed on the
/// rayon pool. The output order matches `snapshots` either way.
pub fn analyze_groups<S>(snapshots: &[S], observer: &MemberId, parallel: bool) -> Vec<GroupAnalysis>
where
    S: Borrow<LedgerSnapshot> + Sync,
{
    let build = |snapshot: &S| {
        let snapshot: &LedgerSnapshot = snapshot.borrow();
        GroupAnalysis::build(snapshot, observer)
    };

    if parallel {
        snapshots.par_iter().map(build).collect()
    } else {
        snapshots.iter().map(build).collect()
    }
}

/// Analyze every snapshot for `observer` and fold the results
pub fn summarize<S>(snapshots: &[S], observer: &MemberId, parallel: bool) -> AggregateAnalysis
where
    S: Borrow<LedgerSnapshot> + Sync,
{
    let analyses = analyze_groups(snapshots, observer, parallel);
    let aggregate = AggregateAnalysis::build(&analyses);

    tracing::info!(
        observer = %observer,
        groups = aggregate.group_count,
        parallel,
        "summarized groups"
    );

    aggregate
}
