//! Service layer for vatu-tracker
//!
//! One service per backend resource. Reads go through the session's query
//! cache; every successful write invalidates the cached data it affects.

pub mod auth;
pub mod category;
pub mod envelope;
pub mod funding;
pub mod recurring;
pub mod report;
pub mod savings_goal;
pub mod transaction;

pub use auth::AuthService;
pub use category::CategoryService;
pub use envelope::EnvelopeService;
pub use funding::{FundingReceipt, FundingService};
pub use recurring::RecurringService;
pub use report::ReportService;
pub use savings_goal::SavingsGoalService;
pub use transaction::{TransactionFilter, TransactionService};
