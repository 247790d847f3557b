//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod cache;
pub mod category;
pub mod config;
pub mod envelope;
pub mod export;
pub mod fund;
pub mod goal;
pub mod recurring;
pub mod report;
pub mod transaction;

pub use auth::{handle_auth_command, AuthCommands};
pub use cache::{handle_cache_command, CacheCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use envelope::{handle_envelope_command, EnvelopeCommands};
pub use export::{handle_export_command, ExportCommands};
pub use fund::{handle_fund_command, FundCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

/// The local calendar date used for due buckets, paces and form defaults
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
