//! CLI commands for group and cross-group analysis

use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{resolve_observer, OutputFormat};
use crate::config::Settings;
use crate::display::report::{double_separator, separator};
use crate::display::{format_balance_table, format_category_table, format_transfer_table};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_to_path, write_report, CsvRows};
use crate::reports::{category_breakdown, summarize, GroupAnalysis};
use crate::services::{compute_balances, settlement_plan};
use crate::storage::{write_atomic, Storage};

/// Arguments of `group`
#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Group id or exact name
    pub group: String,

    /// Member to analyze for (defaults to `default_observer`)
    #[arg(long = "as", value_name = "MEMBER")]
    pub observer: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Member to summarize for (defaults to `default_observer`)
    #[arg(long = "as", value_name = "MEMBER")]
    pub observer: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Analyze groups one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments of `balances`
#[derive(Args, Debug)]
pub struct BalancesArgs {
    /// Group id or exact name
    pub group: String,
}

/// Handle `group`
pub fn handle_group_command(storage: &Storage, settings: &Settings, args: GroupArgs) -> LedgerResult<()> {
    let snapshot = storage.group(&args.group)?;
    let observer = resolve_observer(args.observer.as_deref(), settings)?;

    if !snapshot.is_member(&observer) {
        tracing::warn!(
            group = %snapshot.group_id,
            observer = %observer,
            "observer is not a current member of the group"
        );
    }

    let analysis = GroupAnalysis::build(snapshot, &observer);
    let title = format!("group {} for {}", analysis.group_name, observer);

    emit(&analysis, &title, args.format, args.output, || {
        analysis.format_terminal(&settings.currency_symbol)
    })
}

/// Handle `summary`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> LedgerResult<()> {
    let observer = resolve_observer(args.observer.as_deref(), settings)?;

    let snapshots = storage.groups_for_member(&observer);
    if snapshots.is_empty() && !storage.knows_member(&observer) {
        return Err(LedgerError::member_not_found(observer.as_str()));
    }

    let parallel = settings.parallel_analysis && !args.sequential;
    let aggregate = summarize(&snapshots, &observer, parallel);
    let title = format!("summary for {}", observer);

    emit(&aggregate, &title, args.format, args.output, || {
        aggregate.format_terminal(&settings.currency_symbol)
    })
}

/// Handle `balances`: every member's balance and the full settlement plan
pub fn handle_balances_command(
    storage: &Storage,
    settings: &Settings,
    args: BalancesArgs,
) -> LedgerResult<()> {
    let snapshot = storage.group(&args.group)?;
    let symbol = &settings.currency_symbol;

    let sheet = compute_balances(snapshot);
    let plan = settlement_plan(&sheet.balances);

    println!("Balances: {} ({})", snapshot.name, snapshot.group_id);
    println!("{}", double_separator(60));
    println!("{}", format_balance_table(&sheet.sorted_balances(), symbol));
    println!();
    println!("Settlement plan");
    println!("{}", separator(60));
    println!("{}", format_transfer_table(&plan, symbol));
    println!();
    println!("Spending by category");
    println!("{}", separator(60));
    println!(
        "{}",
        format_category_table(
            &category_breakdown(&sheet.category_totals, sheet.total_spent),
            symbol
        )
    );

    Ok(())
}

/// Render a report to stdout or a file in the requested format
fn emit<T, F>(
    report: &T,
    title: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
    terminal: F,
) -> LedgerResult<()>
where
    T: Serialize + CsvRows,
    F: FnOnce() -> String,
{
    match (format.export_format(), output) {
        (Some(export_format), Some(path)) => {
            export_to_path(report, title, export_format, &path)?;
            println!("Exported {} to: {}", title, path.display());
        }
        (Some(export_format), None) => {
            write_report(report, title, export_format, io::stdout().lock())?;
        }
        (None, Some(path)) => {
            let text = terminal();
            write_atomic(&path, |writer| {
                writer.write_all(text.as_bytes())?;
                Ok(())
            })?;
            println!("Exported {} to: {}", title, path.display());
        }
        (None, None) => println!("{}", terminal()),
    }
    Ok(())
}
