//! Envelope, savings goal and contribution forms

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{non_negative_amount, optional_text, positive_amount, required_date, required_text};
use crate::error::{FieldErrors, TrackerError, TrackerResult};
use crate::models::{
    CategoryId, ContributionPayload, CreateEnvelopePayload, SavingsGoal, SavingsGoalPayload,
};

/// New envelope: a category id and its initial budget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeForm {
    pub category: String,
    pub budgeted_amount: String,
}

impl EnvelopeForm {
    /// `category` must already be resolved to an id string
    pub fn validate(&self) -> TrackerResult<CreateEnvelopePayload> {
        let mut errors = FieldErrors::new();

        let category = match self.category.trim().parse::<CategoryId>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add("category", "Select a category");
                None
            }
        };
        let budgeted_amount = non_negative_amount(&mut errors, "budgeted_amount", &self.budgeted_amount);

        let (Some(category), Some(budgeted_amount)) = (category, budgeted_amount) else {
            return Err(TrackerError::Form(errors));
        };
        Ok(CreateEnvelopePayload {
            category,
            budgeted_amount,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoalForm {
    pub name: String,
    pub target_amount: String,
    pub target_date: String,
    pub category_name: String,
}

impl SavingsGoalForm {
    pub fn from_goal(goal: &SavingsGoal) -> Self {
        Self {
            name: goal.name.clone(),
            target_amount: goal.target_amount.to_decimal_string(),
            target_date: goal.target_date.format("%Y-%m-%d").to_string(),
            category_name: goal.category_name.clone(),
        }
    }

    /// A new goal's target date must not be in the past
    pub fn validate(&self, today: NaiveDate) -> TrackerResult<SavingsGoalPayload> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", &self.name);
        let target_amount = positive_amount(&mut errors, "target_amount", &self.target_amount);
        let target_date = required_date(&mut errors, "target_date", &self.target_date);
        if target_date.is_some_and(|d| d < today) {
            errors.add("target_date", "Target date cannot be in the past");
        }

        let (Some(name), Some(target_amount), Some(target_date)) = (name, target_amount, target_date)
        else {
            return Err(TrackerError::Form(errors));
        };
        errors.into_result()?;

        Ok(SavingsGoalPayload {
            name,
            target_amount,
            target_date,
            category_name: optional_text(&self.category_name),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionForm {
    pub amount: String,
}

impl ContributionForm {
    pub fn validate(&self) -> TrackerResult<ContributionPayload> {
        let mut errors = FieldErrors::new();
        let Some(amount) = positive_amount(&mut errors, "amount", &self.amount) else {
            return Err(TrackerError::Form(errors));
        };
        Ok(ContributionPayload { amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    #[test]
    fn test_envelope_form() {
        let form = EnvelopeForm {
            category: "12".into(),
            budgeted_amount: "0".into(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.category, CategoryId::new(12));
        assert!(payload.budgeted_amount.is_zero());

        let bad = EnvelopeForm {
            category: "Rent".into(),
            budgeted_amount: "-1".into(),
        };
        assert!(matches!(bad.validate(), Err(TrackerError::Form(e)) if e.len() == 2));
    }

    #[test]
    fn test_goal_form_rejects_past_date() {
        let form = SavingsGoalForm {
            name: "Car".into(),
            target_amount: "5000".into(),
            target_date: "2025-04-30".into(),
            category_name: String::new(),
        };
        match form.validate(today()) {
            Err(TrackerError::Form(errors)) => {
                assert_eq!(errors.get("target_date"), Some("Target date cannot be in the past"))
            }
            other => panic!("expected form errors, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_form_valid() {
        let form = SavingsGoalForm {
            name: "Car".into(),
            target_amount: "VT 5,000".into(),
            target_date: "2025-12-31".into(),
            category_name: "Savings".into(),
        };
        let payload = form.validate(today()).unwrap();
        assert_eq!(payload.target_amount, Money::from_cents(500_000));
        assert_eq!(payload.category_name.as_deref(), Some("Savings"));
    }

    #[test]
    fn test_contribution_form() {
        assert!(ContributionForm { amount: "25".into() }.validate().is_ok());
        assert!(ContributionForm { amount: "0".into() }.validate().is_err());
    }
}
