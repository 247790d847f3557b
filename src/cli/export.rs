//! CLI commands for data export
//!
//! Transaction exports are produced by the server and saved as-is; envelope
//! snapshots are rendered locally from the current envelope list.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::PathBuf;

use super::today;
use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;
use crate::export::{save_download, snapshot_filename, write_snapshot, SnapshotFormat};
use crate::models::ExportFormat;
use crate::services::{EnvelopeService, ReportService};
use crate::session::Session;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Download transactions from the server
    Transactions {
        /// csv or json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output file (defaults to the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a snapshot of every envelope
    Envelopes {
        /// csv, json or yaml
        #[arg(short, long, default_value = "csv")]
        format: SnapshotFormat,
        /// Output file (defaults to the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(
    session: &Session,
    paths: &TrackerPaths,
    cmd: ExportCommands,
) -> TrackerResult<()> {
    match cmd {
        ExportCommands::Transactions {
            format,
            from,
            to,
            output,
        } => {
            let download = ReportService::new(session).export(format, from, to)?;
            let path = save_download(&download, &paths.export_dir(), output.as_deref())?;
            println!("Exported {} bytes to {}", download.bytes.len(), path.display());
        }

        ExportCommands::Envelopes { format, output } => {
            let envelopes = EnvelopeService::new(session).list()?;
            let path = output
                .unwrap_or_else(|| paths.export_dir().join(snapshot_filename(format, today())));
            write_snapshot(&envelopes, session.near_limit_threshold(), format, &path)?;
            println!("Exported {} envelopes to {}", envelopes.len(), path.display());
        }
    }

    Ok(())
}
