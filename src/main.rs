use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vatu_tracker::cli::{
    handle_auth_command, handle_cache_command, handle_category_command, handle_config_command,
    handle_envelope_command, handle_export_command, handle_fund_command, handle_goal_command,
    handle_recurring_command, handle_report_command, handle_transaction_command,
};
use vatu_tracker::config::settings::normalize_base_url;
use vatu_tracker::config::{Settings, TrackerPaths};
use vatu_tracker::session::Session;

/// Environment variable holding the log filter (e.g. `debug`, `vatu_tracker=trace`)
const LOG_ENV: &str = "VATU_LOG";

#[derive(Parser)]
#[command(
    name = "vatu",
    version,
    about = "Terminal client for a personal-finance REST backend",
    long_about = "vatu talks to a personal-finance REST backend: record transactions, \
                  budget with envelopes, fund them from income, track savings goals \
                  and recurring payments, and read reports from the command line."
)]
struct Cli {
    /// Bearer token for the backend
    #[arg(long, global = true, env = "VATU_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Override the backend base URL for this invocation
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, refresh a token, or register
    #[command(subcommand)]
    Auth(vatu_tracker::cli::AuthCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(vatu_tracker::cli::TransactionCommands),

    /// Category commands
    #[command(subcommand)]
    Category(vatu_tracker::cli::CategoryCommands),

    /// Envelope budget commands
    #[command(subcommand, alias = "env")]
    Envelope(vatu_tracker::cli::EnvelopeCommands),

    /// Fund envelopes from income
    #[command(subcommand)]
    Fund(vatu_tracker::cli::FundCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(vatu_tracker::cli::GoalCommands),

    /// Recurring transaction commands
    #[command(subcommand)]
    Recurring(vatu_tracker::cli::RecurringCommands),

    /// Reports computed by the backend
    #[command(subcommand)]
    Report(vatu_tracker::cli::ReportCommands),

    /// Export transactions or envelope snapshots
    #[command(subcommand)]
    Export(vatu_tracker::cli::ExportCommands),

    /// Inspect or clear the local query cache
    #[command(subcommand)]
    Cache(vatu_tracker::cli::CacheCommands),

    /// Show or change settings
    #[command(subcommand)]
    Config(vatu_tracker::cli::ConfigCommands),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(url) = cli.api_url {
        settings.api_base_url = normalize_base_url(&url);
        settings.validate()?;
    }

    let command = match cli.command {
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, settings, cmd)?;
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("vatu - personal-finance tracker");
            println!();
            println!("Run 'vatu --help' for usage information.");
            println!("Run 'vatu config init' to get started.");
            return Ok(());
        }
    };

    let session = Session::open(&paths, settings, cli.token)?;
    tracing::debug!(base_url = %session.settings.api_base_url, "session opened");

    let result = match command {
        Commands::Auth(cmd) => handle_auth_command(&session, cmd),
        Commands::Transaction(cmd) => handle_transaction_command(&session, cmd),
        Commands::Category(cmd) => handle_category_command(&session, cmd),
        Commands::Envelope(cmd) => handle_envelope_command(&session, cmd),
        Commands::Fund(cmd) => handle_fund_command(&session, cmd),
        Commands::Goal(cmd) => handle_goal_command(&session, cmd),
        Commands::Recurring(cmd) => handle_recurring_command(&session, cmd),
        Commands::Report(cmd) => handle_report_command(&session, cmd),
        Commands::Export(cmd) => handle_export_command(&session, &paths, cmd),
        Commands::Cache(cmd) => handle_cache_command(&session, cmd),
        Commands::Config(_) => Ok(()),
    };

    // Invalidations from successful writes must persist even if a later step failed
    if let Err(e) = session.finish() {
        tracing::warn!(error = %e, "failed to save query cache");
    }

    result?;
    Ok(())
}
