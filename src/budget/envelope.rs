//! Envelope status computation
//!
//! Derived envelope figures are recomputed locally from the budgeted and
//! spent amounts rather than trusting the server's copies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Envelope, Money};

/// Default percentage at which an envelope counts as near its limit
pub const DEFAULT_NEAR_LIMIT_THRESHOLD: f64 = 80.0;

/// Derived budget figures for one envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeStatus {
    pub budgeted: Money,
    pub spent: Money,
    /// budgeted - spent, exact
    pub remaining: Money,
    /// spent / budgeted * 100, or 0 when nothing is budgeted
    pub percentage_used: f64,
    pub is_over_budget: bool,
    /// Never true while over budget
    pub is_near_limit: bool,
}

impl EnvelopeStatus {
    pub fn compute(budgeted: Money, spent: Money, near_limit_threshold: f64) -> Self {
        let remaining = budgeted - spent;
        let percentage_used = if budgeted.is_zero() {
            0.0
        } else {
            spent.as_f64() / budgeted.as_f64() * 100.0
        };
        let is_over_budget = spent > budgeted;
        let is_near_limit = !is_over_budget && percentage_used >= near_limit_threshold;

        Self {
            budgeted,
            spent,
            remaining,
            percentage_used,
            is_over_budget,
            is_near_limit,
        }
    }

    pub fn health(&self) -> EnvelopeHealth {
        if self.is_over_budget {
            EnvelopeHealth::OverBudget
        } else if self.is_near_limit {
            EnvelopeHealth::NearLimit
        } else {
            EnvelopeHealth::Healthy
        }
    }

    /// Percentage for progress bars, clamped to 0..=100
    pub fn bar_percentage(&self) -> f64 {
        self.percentage_used.clamp(0.0, 100.0)
    }
}

/// Three-state summary used for display coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeHealth {
    Healthy,
    NearLimit,
    OverBudget,
}

impl EnvelopeHealth {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "OK",
            Self::NearLimit => "Near limit",
            Self::OverBudget => "Over budget",
        }
    }
}

impl fmt::Display for EnvelopeHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totals across a set of envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvelopeTotals {
    pub count: usize,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
    pub over_budget_count: usize,
    pub near_limit_count: usize,
}

impl EnvelopeTotals {
    pub fn from_envelopes(envelopes: &[Envelope], near_limit_threshold: f64) -> Self {
        envelopes.iter().fold(Self::default(), |mut totals, envelope| {
            let status = envelope.status(near_limit_threshold);
            totals.count += 1;
            totals.budgeted += status.budgeted;
            totals.spent += status.spent;
            totals.remaining += status.remaining;
            if status.is_over_budget {
                totals.over_budget_count += 1;
            }
            if status.is_near_limit {
                totals.near_limit_count += 1;
            }
            totals
        })
    }

    /// Overall percentage of the budget spent
    pub fn percentage_used(&self) -> f64 {
        EnvelopeStatus::compute(self.budgeted, self.spent, DEFAULT_NEAR_LIMIT_THRESHOLD)
            .percentage_used
    }
}
