//! CLI commands for inspecting the loaded ledger

use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::MemberId;
use crate::services::compute_balances;
use crate::storage::Storage;

/// Arguments of `groups`
#[derive(Args, Debug)]
pub struct GroupsArgs {
    /// Only list groups this member currently belongs to
    #[arg(long = "as", value_name = "MEMBER")]
    pub observer: Option<String>,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Expenses")]
    expenses: usize,
    #[tabled(rename = "Payments")]
    payments: usize,
    #[tabled(rename = "Total spent")]
    total_spent: String,
}

/// Handle `groups`
pub fn handle_groups_command(storage: &Storage, settings: &Settings, args: GroupsArgs) -> LedgerResult<()> {
    let groups = match args.observer.as_deref().map(str::trim) {
        Some(member) if !member.is_empty() => storage.groups_for_member(&MemberId::from(member)),
        _ => storage.groups(),
    };

    if groups.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    let rows: Vec<GroupRow> = groups
        .iter()
        .map(|snapshot| GroupRow {
            id: snapshot.group_id.to_string(),
            name: snapshot.name.clone(),
            members: snapshot.member_count(),
            expenses: snapshot.expenses.len(),
            payments: snapshot.payments.len(),
            total_spent: compute_balances(snapshot)
                .total_spent
                .format_with_symbol(&settings.currency_symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!("{} group(s)", groups.len());

    Ok(())
}

/// Handle `check`: report data-quality issues, failing if any were found
pub fn handle_check_command(storage: &Storage) -> LedgerResult<()> {
    let problems = storage.validate();

    if problems.is_empty() {
        println!("No issues found in {} group(s).", storage.len());
        return Ok(());
    }

    let mut count = 0;
    for (snapshot, issues) in &problems {
        println!("{} ({})", snapshot.name, snapshot.group_id);
        for issue in issues {
            println!("  - {}", issue);
        }
        count += issues.len();
    }

    Err(LedgerError::Validation(format!(
        "{} issue(s) found in {} group(s)",
        count,
        problems.len()
    )))
}
