//! Budget arithmetic that runs on the client
//!
//! Everything here is pure: no I/O, no clock reads. Callers pass in "today"
//! and the near-limit threshold from settings.

pub mod envelope;
pub mod funding;
pub mod savings;
pub mod schedule;

pub use envelope::{EnvelopeHealth, EnvelopeStatus, EnvelopeTotals, DEFAULT_NEAR_LIMIT_THRESHOLD};
pub use funding::{
    fill_to_zero, quick_fill, smart_fill, FundingEntry, FundingPlan, FundingStrategy,
};
pub use savings::GoalPace;
pub use schedule::{preview_occurrences, DueBucket, DUE_SOON_DAYS};
