//! Envelope model
//!
//! An envelope is a budget bucket tied to one category. The backend sends
//! its own derived fields; the client recomputes them from the two amounts
//! it trusts (budgeted and spent) via [`crate::budget::EnvelopeStatus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, EnvelopeId, UserId};
use super::money::Money;
use crate::budget::EnvelopeStatus;

/// An envelope as returned by `/envelopes/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: EnvelopeId,

    #[serde(default)]
    pub user: Option<UserId>,

    pub category: CategoryId,

    #[serde(default)]
    pub category_name: String,

    pub budgeted_amount: Money,

    #[serde(default)]
    pub spent_amount: Money,

    /// Server-computed remaining amount, kept for reference only
    #[serde(default)]
    pub remaining_amount: Option<Money>,

    #[serde(default)]
    pub percentage_used: Option<f64>,

    #[serde(default)]
    pub is_over_budget: Option<bool>,

    #[serde(default)]
    pub is_near_limit: Option<bool>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Envelope {
    /// Derived budget figures using the given near-limit threshold
    pub fn status(&self, near_limit_threshold: f64) -> EnvelopeStatus {
        EnvelopeStatus::compute(self.budgeted_amount, self.spent_amount, near_limit_threshold)
    }

    /// Remaining balance, always recomputed from budgeted and spent
    pub fn remaining(&self) -> Money {
        self.budgeted_amount - self.spent_amount
    }

    /// Whether the server's remaining figure disagrees with the local one
    pub fn is_out_of_sync(&self) -> bool {
        self.remaining_amount
            .map(|server| server != self.remaining())
            .unwrap_or(false)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: budgeted {} | spent {} | remaining {}",
            self.category_name,
            self.budgeted_amount,
            self.spent_amount,
            self.remaining()
        )
    }
}

/// Body for `POST /envelopes/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEnvelopePayload {
    pub category: CategoryId,
    pub budgeted_amount: Money,
}

/// Body for `PUT /envelopes/{id}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEnvelopePayload {
    pub budgeted_amount: Money,
}

/// Aggregate returned by `/envelopes/summary/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSummary {
    #[serde(default)]
    pub total_envelopes: usize,
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    #[serde(default)]
    pub over_budget_count: usize,
    #[serde(default)]
    pub near_limit_count: usize,
    #[serde(default)]
    pub envelopes: Vec<Envelope>,
}
