//! Balance accumulation
//!
//! Folds a snapshot's expenses and payments into one signed balance per
//! member plus spending totals per category. Positive balances are owed
//! money, negative balances owe money.

use std::collections::HashMap;

use crate::models::{Amount, Expense, LedgerSnapshot, MemberId, Payment};

/// Net balance per member
pub type Balances = HashMap<MemberId, Amount>;

/// Spending per category label
pub type CategoryTotals = HashMap<String, Amount>;

/// Result of accumulating one snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSheet {
    /// Every current member plus anyone a record names
    pub balances: Balances,
    /// Sum of all expense values
    pub total_spent: Amount,
    pub category_totals: CategoryTotals,
}

impl BalanceSheet {
    /// Start a sheet with every member at zero
    fn for_members<'a>(members: impl IntoIterator<Item = &'a MemberId>) -> Self {
        Self {
            balances: members
                .into_iter()
                .map(|m| (m.clone(), Amount::zero()))
                .collect(),
            ..Default::default()
        }
    }

    /// Credit the payer the full value, then debit every current member
    /// (payer included) an even share.
    fn apply_expense(&mut self, expense: &Expense, members: &[&MemberId]) {
        self.total_spent += expense.value;
        *self
            .category_totals
            .entry(expense.category.clone())
            .or_default() += expense.value;

        let share = expense.value / members.len();
        *self.balances.entry(expense.payer_id.clone()).or_default() += expense.value;
        for member in members {
            *self.balances.entry((*member).clone()).or_default() -= share;
        }
    }

    fn apply_payment(&mut self, payment: &Payment) {
        *self.balances.entry(payment.payer_id.clone()).or_default() += payment.value;
        *self.balances.entry(payment.target_id.clone()).or_default() -= payment.value;
    }

    /// Balance of one member, zero if the member never appears
    pub fn balance_of(&self, member: &MemberId) -> Amount {
        self.balances.get(member).copied().unwrap_or_default()
    }

    /// All balances, largest creditor first, ties broken by member id
    pub fn sorted_balances(&self) -> Vec<(&MemberId, Amount)> {
        let mut entries: Vec<_> = self.balances.iter().map(|(m, b)| (m, *b)).collect();
        entries.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Sum of all balances; zero up to floating-point residue
    pub fn net_total(&self) -> Amount {
        self.balances.values().sum()
    }
}

/// Compute member balances, total spend and category totals for a snapshot
///
/// An empty member set yields an empty sheet: there is nobody to split
/// across, so expenses and payments are not looked at.
pub fn compute_balances(snapshot: &LedgerSnapshot) -> BalanceSheet {
    if snapshot.members.is_empty() {
        return BalanceSheet::default();
    }

    let members: Vec<&MemberId> = snapshot.members.iter().collect();
    let mut sheet = BalanceSheet::for_members(members.iter().copied());

    for expense in &snapshot.expenses {
        sheet.apply_expense(expense, &members);
    }
    for payment in &snapshot.payments {
        sheet.apply_payment(payment);
    }

    sheet
}
