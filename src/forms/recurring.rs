//! Recurring transaction form

use serde::{Deserialize, Serialize};

use super::{optional_date, optional_text, positive_amount, required_date, required_text};
use crate::error::{FieldErrors, TrackerError, TrackerResult};
use crate::models::{Frequency, RecurringPayload, RecurringTransaction, TransactionType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringForm {
    pub name: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub transaction_type: String,
    pub frequency: String,
    pub start_date: String,
    pub end_date: String,
    pub max_occurrences: String,
}

impl RecurringForm {
    pub fn from_recurring(rec: &RecurringTransaction) -> Self {
        Self {
            name: rec.name.clone(),
            description: rec.description.clone(),
            amount: rec.amount.to_decimal_string(),
            category: rec.category.clone(),
            transaction_type: rec.transaction_type.as_str().to_string(),
            frequency: rec.frequency.label().to_string(),
            start_date: rec.start_date.format("%Y-%m-%d").to_string(),
            end_date: rec
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            max_occurrences: rec
                .max_occurrences
                .map(|m| m.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> TrackerResult<RecurringPayload> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", &self.name);
        let amount = positive_amount(&mut errors, "amount", &self.amount);
        let category = required_text(&mut errors, "category", &self.category);
        let transaction_type = match self.transaction_type.parse::<TransactionType>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.add("transaction_type", e);
                None
            }
        };
        let frequency = match self.frequency.parse::<Frequency>() {
            Ok(f) => Some(f),
            Err(e) => {
                errors.add("frequency", e);
                None
            }
        };
        let start_date = required_date(&mut errors, "start_date", &self.start_date);
        let end_date = optional_date(&mut errors, "end_date", &self.end_date);

        let max_occurrences = match self.max_occurrences.trim() {
            "" => Some(None),
            raw => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(Some(n)),
                _ => {
                    errors.add("max_occurrences", "Must be a whole number greater than zero");
                    None
                }
            },
        };

        if let (Some(start), Some(Some(end))) = (start_date, end_date) {
            if end < start {
                errors.add("end_date", "End date must be on or after the start date");
            }
        }

        let (
            Some(name),
            Some(amount),
            Some(category),
            Some(transaction_type),
            Some(frequency),
            Some(start_date),
            Some(end_date),
            Some(max_occurrences),
        ) = (
            name,
            amount,
            category,
            transaction_type,
            frequency,
            start_date,
            end_date,
            max_occurrences,
        )
        else {
            return Err(TrackerError::Form(errors));
        };
        errors.into_result()?;

        Ok(RecurringPayload {
            name,
            description: optional_text(&self.description),
            amount,
            category,
            transaction_type,
            frequency,
            start_date,
            end_date,
            max_occurrences,
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid() -> RecurringForm {
        RecurringForm {
            name: "Rent".into(),
            description: String::new(),
            amount: "450".into(),
            category: "Housing".into(),
            transaction_type: "expense".into(),
            frequency: "monthly".into(),
            start_date: "2025-01-31".into(),
            end_date: String::new(),
            max_occurrences: "12".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let payload = valid().validate().unwrap();
        assert_eq!(payload.frequency, Frequency::Monthly);
        assert_eq!(payload.max_occurrences, Some(12));
        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert!(payload.end_date.is_none());
        assert!(payload.description.is_none());
    }

    #[test]
    fn test_end_before_start() {
        let mut form = valid();
        form.end_date = "2024-12-31".into();
        match form.validate() {
            Err(TrackerError::Form(errors)) => assert!(errors.get("end_date").is_some()),
            other => panic!("expected form errors, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_frequency_and_max() {
        let mut form = valid();
        form.frequency = "hourly".into();
        form.max_occurrences = "0".into();
        match form.validate() {
            Err(TrackerError::Form(errors)) => {
                assert!(errors.get("frequency").is_some());
                assert!(errors.get("max_occurrences").is_some());
            }
            other => panic!("expected form errors, got {:?}", other),
        }
    }
}
