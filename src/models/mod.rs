//! Core data models for splitledger
//!
//! Members, expenses, payments and the per-group snapshot the engine reads.

pub mod expense;
pub mod ids;
pub mod money;
pub mod payment;
pub mod snapshot;

pub use expense::{Expense, RecordValidationError};
pub use ids::{ExpenseId, GroupId, MemberId, PaymentId};
pub use money::{Amount, AmountParseError, CENT};
pub use payment::Payment;
pub use snapshot::{LedgerSnapshot, SnapshotIssue};
