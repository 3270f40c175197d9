use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use splitledger::cli::{
    handle_balances_command, handle_check_command, handle_group_command, handle_groups_command,
    handle_summary_command, BalancesArgs, GroupArgs, GroupsArgs, SummaryArgs,
};
use splitledger::config::{paths::LedgerPaths, settings::Settings};
use splitledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "splitledger",
    author = "Kaylee Beyene",
    version,
    about = "Balances and settlements for shared-expense groups",
    long_about = "splitledger reads a ledger export of shared-expense groups and \
                  reports who owes whom: per-group balances, suggested settlements \
                  and spending by category, for one member or across all of their groups."
)]
struct Cli {
    /// Ledger export to read (defaults to <data dir>/ledger.json)
    #[arg(long, global = true, env = "SPLITLEDGER_FILE", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one group from a member's point of view
    Group(GroupArgs),

    /// Summarize every group a member belongs to
    Summary(SummaryArgs),

    /// Show all balances and the settlement plan of a group
    Balances(BalancesArgs),

    /// List groups in the ledger
    #[command(alias = "ls")]
    Groups(GroupsArgs),

    /// Check the ledger for inconsistent records
    Check,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => settings.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_new(format!("splitledger={level}"))
            .unwrap_or_else(|_| EnvFilter::new("splitledger=warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(cli.verbose, &settings);

    let Some(command) = cli.command else {
        println!("splitledger - balances and settlements for shared-expense groups");
        println!();
        println!("Run 'splitledger --help' for usage information.");
        return Ok(());
    };

    let ledger_file = cli.file.unwrap_or_else(|| paths.ledger_file());

    let load = || Storage::load(&ledger_file);

    match command {
        Commands::Group(args) => handle_group_command(&load()?, &settings, args)?,
        Commands::Summary(args) => handle_summary_command(&load()?, &settings, args)?,
        Commands::Balances(args) => handle_balances_command(&load()?, &settings, args)?,
        Commands::Groups(args) => handle_groups_command(&load()?, &settings, args)?,
        Commands::Check => handle_check_command(&load()?)?,
        Commands::Config => print_config(&paths, &settings, &ledger_file),
    }

    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings, ledger_file: &Path) {
    println!("splitledger Configuration");
    println!("=========================");
    println!("Config directory:  {}", paths.base_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Ledger file:       {}", ledger_file.display());
    println!("Exports directory: {}", paths.exports_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:   {}", settings.currency_symbol);
    println!(
        "  Default member:    {}",
        settings
            .default_observer
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("  Parallel analysis: {}", settings.parallel_analysis);
    println!("  Log level:         {}", settings.log_level);
}
