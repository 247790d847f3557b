//! Data models for the tracker API
//!
//! These mirror the JSON resources served by the backend: transactions,
//! categories, envelopes, savings goals, recurring templates and reports.

pub mod auth;
pub mod balance;
pub mod category;
pub mod envelope;
pub mod ids;
pub mod money;
pub mod recurring;
pub mod report;
pub mod savings_goal;
pub mod transaction;

pub use auth::{AuthTokens, User};
pub use balance::{Balance, Income};
pub use category::{Category, CategoryPayload};
pub use envelope::{CreateEnvelopePayload, Envelope, EnvelopeSummary, UpdateEnvelopePayload};
pub use ids::{CategoryId, EnvelopeId, GoalId, RecurringId, TransactionId, UserId};
pub use money::{Money, CURRENCY_SYMBOL};
pub use recurring::{
    Frequency, ProcessOverdueResult, RecurringPayload, RecurringStatus, RecurringTransaction,
};
pub use report::{ComparisonKind, ComparisonReport, ExportFormat, MonthlyReport, YearlyReport};
pub use savings_goal::{ContributionPayload, SavingsGoal, SavingsGoalPayload};
pub use transaction::{Transaction, TransactionPayload, TransactionType};
