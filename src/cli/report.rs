//! Report CLI commands

use clap::Subcommand;

use crate::display::{format_comparison_report, format_monthly_report, format_yearly_report};
use crate::error::TrackerResult;
use crate::models::ComparisonKind;
use crate::services::ReportService;
use crate::session::Session;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and category breakdown for one month
    Monthly {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Month-by-month totals for one year
    Yearly {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Compare the current period with the previous one
    Compare {
        /// monthly or yearly
        #[arg(short = 't', long = "type", default_value = "monthly")]
        kind: ComparisonKind,
    },

    /// Discard cached reports
    Refresh,
}

/// Handle a report command
pub fn handle_report_command(session: &Session, cmd: ReportCommands) -> TrackerResult<()> {
    let service = ReportService::new(session);

    match cmd {
        ReportCommands::Monthly { year, month } => {
            let report = service.monthly(year, month)?;
            print!("{}", format_monthly_report(&report));
        }

        ReportCommands::Yearly { year } => {
            let report = service.yearly(year)?;
            print!("{}", format_yearly_report(&report));
        }

        ReportCommands::Compare { kind } => {
            let report = service.comparison(kind)?;
            print!("{}", format_comparison_report(&report));
        }

        ReportCommands::Refresh => {
            service.refresh()?;
            println!("Cached reports cleared.");
        }
    }

    Ok(())
}
