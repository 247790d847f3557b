//! Due-date classification for recurring templates
//!
//! The server's `is_overdue`/`days_until_next` go stale as soon as the day
//! rolls over, so buckets are computed against a caller-supplied "today".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{RecurringStatus, RecurringTransaction};

/// Templates due within this many days are flagged as due soon
pub const DUE_SOON_DAYS: i64 = 3;

/// Where a template's next occurrence falls relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueBucket {
    Completed,
    /// Active and past due by this many days
    Overdue(i64),
    /// Paused with a next date this many days in the past
    Lapsed(i64),
    Today,
    Tomorrow,
    InDays(i64),
}

impl DueBucket {
    pub fn classify(next_occurrence: NaiveDate, status: RecurringStatus, today: NaiveDate) -> Self {
        if status == RecurringStatus::Completed {
            return Self::Completed;
        }

        let days = (next_occurrence - today).num_days();
        match days {
            d if d < 0 && status == RecurringStatus::Active => Self::Overdue(-d),
            d if d < 0 => Self::Lapsed(-d),
            0 => Self::Today,
            1 => Self::Tomorrow,
            d => Self::InDays(d),
        }
    }

    pub fn of(recurring: &RecurringTransaction, today: NaiveDate) -> Self {
        Self::classify(recurring.next_occurrence, recurring.status, today)
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue(_))
    }

    /// Today, tomorrow, or within [`DUE_SOON_DAYS`]
    pub fn is_due_soon(&self) -> bool {
        match self {
            Self::Today | Self::Tomorrow => true,
            Self::InDays(d) => *d <= DUE_SOON_DAYS,
            _ => false,
        }
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Overdue(_) => write!(f, "Overdue"),
            Self::Lapsed(1) => write!(f, "1 day ago"),
            Self::Lapsed(d) => write!(f, "{} days ago", d),
            Self::Today => write!(f, "Today"),
            Self::Tomorrow => write!(f, "Tomorrow"),
            Self::InDays(d) => write!(f, "In {} days", d),
        }
    }
}

/// Upcoming occurrence dates, for display only
///
/// Starts at `next_occurrence` and stops at `end_date`, at the remaining
/// `max_occurrences`, or after `limit` dates. Completed templates have none.
pub fn preview_occurrences(recurring: &RecurringTransaction, limit: usize) -> Vec<NaiveDate> {
    if recurring.status == RecurringStatus::Completed {
        return Vec::new();
    }

    let limit = match recurring.remaining_occurrences() {
        Some(left) => limit.min(left as usize),
        None => limit,
    };

    let mut dates = Vec::with_capacity(limit);
    let mut next = Some(recurring.next_occurrence);

    while let Some(date) = next {
        if dates.len() >= limit {
            break;
        }
        if recurring.end_date.is_some_and(|end| date > end) {
            break;
        }
        dates.push(date);
        next = recurring.frequency.advance(date);
    }

    dates
}
