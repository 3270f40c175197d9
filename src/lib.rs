//! splitledger - shared-expense ledger engine
//!
//! Given one group's members, expenses and payments, this library computes
//! every member's net balance and spending per category, turns balances into
//! pairwise settlements, and reports them from one member's point of view.
//! A member's per-group reports fold into a cross-group summary.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Identifiers, amounts, expenses, payments and ledger snapshots
//! - `services`: Balance accumulation and settlement resolution
//! - `reports`: Group and aggregate analyses
//! - `storage`: Read-only loading of ledger exports
//! - `export`: JSON, YAML and CSV output
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `splitledger` binary
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use splitledger::models::{Amount, Expense, GroupId, LedgerSnapshot, MemberId};
//! use splitledger::reports::GroupAnalysis;
//!
//! let group = GroupId::from("trip");
//! let snapshot = LedgerSnapshot::new(group.clone(), "Trip")
//!     .with_members(["x", "y", "z"])
//!     .with_expense(Expense::new(group.clone(), MemberId::from("x"), Amount::new(90.0), "food"))
//!     .with_expense(Expense::new(group, MemberId::from("y"), Amount::new(30.0), "transport"));
//!
//! let analysis = GroupAnalysis::build(&snapshot, &MemberId::from("x"));
//! assert_eq!(analysis.observer_balance, Amount::new(50.0));
//! assert_eq!(analysis.owed_by_others.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
