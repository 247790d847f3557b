//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GoalId, UserId};
use super::money::Money;

/// A savings goal as returned by `/savings-goals/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,

    #[serde(default)]
    pub user: Option<UserId>,

    pub name: String,

    pub target_amount: Money,

    #[serde(default)]
    pub current_amount: Money,

    pub target_date: NaiveDate,

    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub progress_percentage: Option<f64>,

    #[serde(default)]
    pub remaining_amount: Option<Money>,

    /// Linked category; conventionally "Savings"
    #[serde(default)]
    pub category_name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavingsGoal {
    /// Progress toward the target, 0 when the target is zero
    pub fn progress(&self) -> f64 {
        if self.target_amount.is_zero() {
            return 0.0;
        }
        self.current_amount.as_f64() / self.target_amount.as_f64() * 100.0
    }

    /// Amount still needed (negative once the goal is exceeded)
    pub fn remaining(&self) -> Money {
        self.target_amount - self.current_amount
    }

    /// Completed when the saved amount reaches the target
    pub fn reached(&self) -> bool {
        self.is_completed || self.current_amount >= self.target_amount
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}/{}",
            self.name, self.current_amount, self.target_amount
        )
    }
}

/// Body for creating or updating a savings goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoalPayload {
    pub name: String,
    pub target_amount: Money,
    pub target_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// Body for `POST /savings-goals/{id}/contribute/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionPayload {
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, current: i64) -> SavingsGoal {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Boat",
            "target_amount": target,
            "current_amount": current,
            "target_date": "2026-12-31",
            "category_name": "Savings"
        }))
        .unwrap()
    }

    #[test]
    fn test_progress_and_remaining() {
        let g = goal(1000, 250);
        assert_eq!(g.progress(), 25.0);
        assert_eq!(g.remaining().cents(), 75000);
        assert!(!g.reached());
    }

    #[test]
    fn test_zero_target_has_zero_progress() {
        assert_eq!(goal(0, 0).progress(), 0.0);
    }

    #[test]
    fn test_reached_when_current_meets_target() {
        assert!(goal(500, 500).reached());
    }

    #[test]
    fn test_payload_omits_missing_category() {
        let payload = SavingsGoalPayload {
            name: "Trip".into(),
            target_amount: Money::from_cents(100000),
            target_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            category_name: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("category_name").is_none());
        assert_eq!(value["target_amount"], "1000.00");
    }
}
