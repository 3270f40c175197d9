//! Reports module for splitledger
//!
//! Builds the per-group analysis for one observing member and folds many of
//! those into a cross-group summary.

pub mod aggregate;
pub mod group;

pub use aggregate::{analyze_groups, summarize, AggregateAnalysis};
pub use group::{category_breakdown, CategoryShare, GroupAnalysis, UNCATEGORIZED};
