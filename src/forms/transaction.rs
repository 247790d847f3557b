//! Transaction form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{positive_amount, required_date, required_text};
use crate::error::{FieldErrors, TrackerError, TrackerResult};
use crate::models::{Transaction, TransactionPayload, TransactionType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionForm {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub transaction_type: String,
}

impl TransactionForm {
    /// Blank form dated `today`, defaulting to an expense
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            transaction_type: TransactionType::Expense.as_str().to_string(),
            ..Default::default()
        }
    }

    /// Pre-filled form for editing an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: txn.description.clone(),
            amount: txn.amount.to_decimal_string(),
            category: txn.category.clone(),
            transaction_type: txn.transaction_type.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> TrackerResult<TransactionPayload> {
        let mut errors = FieldErrors::new();

        let date = required_date(&mut errors, "date", &self.date);
        let description = required_text(&mut errors, "description", &self.description);
        let amount = positive_amount(&mut errors, "amount", &self.amount);
        let category = required_text(&mut errors, "category", &self.category);
        let transaction_type = match self.transaction_type.parse::<TransactionType>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.add("transaction_type", e);
                None
            }
        };

        let (Some(date), Some(description), Some(amount), Some(category), Some(transaction_type)) =
            (date, description, amount, category, transaction_type)
        else {
            return Err(TrackerError::Form(errors));
        };

        Ok(TransactionPayload {
            date,
            description,
            amount,
            category,
            transaction_type,
        })
    }
}
