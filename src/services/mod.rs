//! Computation layer for splitledger
//!
//! Pure functions over a borrowed [`LedgerSnapshot`](crate::models::LedgerSnapshot):
//! balance accumulation first, then settlement resolution on its output.

pub mod balance;
pub mod settlement;

pub use balance::{compute_balances, BalanceSheet, Balances, CategoryTotals};
pub use settlement::{
    resolve_debts, settlement_plan, Debt, ObserverDebts, Settlement, SETTLEMENT_EPSILON,
};
