//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the reports layer.

pub mod analysis;
pub mod ledger;

pub use analysis::{
    handle_balances_command, handle_group_command, handle_summary_command, BalancesArgs,
    GroupArgs, SummaryArgs,
};
pub use ledger::{handle_check_command, handle_groups_command, GroupsArgs};

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::ExportFormat;
use crate::models::MemberId;

/// How a report is rendered
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

impl OutputFormat {
    /// The machine-readable export format, `None` for tables
    pub fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Table => None,
            Self::Json => Some(ExportFormat::Json),
            Self::Yaml => Some(ExportFormat::Yaml),
            Self::Csv => Some(ExportFormat::Csv),
        }
    }
}

/// Pick the observing member: the `--as` argument, else the configured default
pub fn resolve_observer(arg: Option<&str>, settings: &Settings) -> LedgerResult<MemberId> {
    let from_arg = arg
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(MemberId::from);

    from_arg
        .or_else(|| settings.default_observer.clone())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            LedgerError::Validation(
                "No member given. Pass --as <MEMBER> or set default_observer in the config file"
                    .into(),
            )
        })
}
