//! Display formatting for terminal output
//!
//! Provides utilities for formatting analyses for terminal display:
//! tables, percentage bars and separators.

pub mod analysis;
pub mod report;

pub use analysis::{
    format_balance_table, format_category_table, format_debt_table, format_transfer_table,
};
