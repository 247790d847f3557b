//! Savings goal rules
//!
//! Contributions are drawn from the Savings envelope, so both the goal
//! target and each contribution are checked against that envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Envelope, Money, SavingsGoal};

/// Find the envelope that funds savings goals
pub fn savings_envelope<'a>(envelopes: &'a [Envelope], savings_category: &str) -> Option<&'a Envelope> {
    envelopes
        .iter()
        .find(|e| e.category_name.eq_ignore_ascii_case(savings_category))
}

fn missing_envelope(savings_category: &str) -> TrackerError {
    TrackerError::Validation(format!(
        "No {0} envelope found. Please create a {0} envelope first.",
        savings_category
    ))
}

/// Check a contribution against the Savings envelope's remaining balance
pub fn validate_contribution(
    amount: Money,
    envelopes: &[Envelope],
    savings_category: &str,
) -> TrackerResult<()> {
    let envelope =
        savings_envelope(envelopes, savings_category).ok_or_else(|| missing_envelope(savings_category))?;

    if !amount.is_positive() {
        return Err(TrackerError::Validation(
            "Contribution amount must be greater than zero".into(),
        ));
    }

    let available = envelope.remaining();
    if amount > available {
        return Err(TrackerError::Validation(format!(
            "Contribution amount ({}) exceeds available {} envelope balance ({})",
            amount, savings_category, available
        )));
    }

    Ok(())
}

/// Check a goal target against the Savings envelope's budgeted amount
pub fn validate_goal_target(
    target: Money,
    envelopes: &[Envelope],
    savings_category: &str,
) -> TrackerResult<()> {
    let envelope =
        savings_envelope(envelopes, savings_category).ok_or_else(|| missing_envelope(savings_category))?;

    if target > envelope.budgeted_amount {
        return Err(TrackerError::Validation(format!(
            "Target amount ({}) exceeds {} envelope allocation ({}). Increase the allocation first.",
            target, savings_category, envelope.budgeted_amount
        )));
    }

    Ok(())
}

/// Projection of whether a goal will be met by its target date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalPace {
    Completed,
    /// Target date is today or already passed
    Overdue,
    NoContributions,
    /// Expected to finish in this many days, before the target date
    OnTrack(i64),
    /// Expected to finish this many days after the target date
    Behind(i64),
}

impl GoalPace {
    /// Project from the average daily contribution since the goal was created
    pub fn project(goal: &SavingsGoal, today: NaiveDate) -> Self {
        if goal.reached() {
            return Self::Completed;
        }

        let days_until_target = (goal.target_date - today).num_days();
        if days_until_target <= 0 {
            return Self::Overdue;
        }

        let created = goal
            .created_at
            .map(|ts| ts.date_naive())
            .unwrap_or(today);
        let days_since_creation = (today - created).num_days().max(1);

        let saved = goal.current_amount.cents();
        if saved <= 0 {
            return Self::NoContributions;
        }

        // ceil(remaining / (saved / days)) in integer cents
        let remaining = goal.remaining().cents().max(0);
        let days_to_complete = (remaining * days_since_creation + saved - 1) / saved;

        if days_to_complete <= days_until_target {
            Self::OnTrack(days_to_complete)
        } else {
            Self::Behind(days_to_complete - days_until_target)
        }
    }

    pub fn is_at_risk(&self) -> bool {
        matches!(self, Self::Overdue | Self::Behind(_))
    }
}

impl fmt::Display for GoalPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Overdue => write!(f, "Overdue"),
            Self::NoContributions => write!(f, "No contributions yet"),
            Self::OnTrack(days) => write!(f, "On track ({} days)", days),
            Self::Behind(days) => write!(f, "{} days behind", days),
        }
    }
}
