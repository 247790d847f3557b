//! Form models
//!
//! Each form holds raw user input as strings, can be serialized as a draft,
//! and validates into the API payload it represents. Validation collects
//! every field error instead of stopping at the first.

pub mod budget;
pub mod category;
pub mod recurring;
pub mod transaction;

pub use budget::{ContributionForm, EnvelopeForm, SavingsGoalForm};
pub use category::CategoryForm;
pub use recurring::RecurringForm;
pub use transaction::TransactionForm;

use chrono::NaiveDate;

use crate::error::FieldErrors;
use crate::models::Money;

/// Longest name or description the backend stores
pub const MAX_TEXT_LEN: usize = 255;

/// Trimmed text, or an error when empty or too long
pub(crate) fn required_text(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required");
        return None;
    }
    if value.chars().count() > MAX_TEXT_LEN {
        errors.add(field, format!("Must be at most {} characters", MAX_TEXT_LEN));
        return None;
    }
    Some(value.to_string())
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A strictly positive amount
pub(crate) fn positive_amount(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<Money> {
    let amount = parse_amount(errors, field, value)?;
    if !amount.is_positive() {
        errors.add(field, "Amount must be greater than zero");
        return None;
    }
    Some(amount)
}

/// A zero or positive amount
pub(crate) fn non_negative_amount(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<Money> {
    let amount = parse_amount(errors, field, value)?;
    if amount.is_negative() {
        errors.add(field, "Amount cannot be negative");
        return None;
    }
    Some(amount)
}

fn parse_amount(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<Money> {
    if value.trim().is_empty() {
        errors.add(field, "This field is required");
        return None;
    }
    match Money::parse(value) {
        Ok(amount) => Some(amount),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

/// A YYYY-MM-DD date
pub(crate) fn required_date(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required");
        return None;
    }
    optional_date(errors, field, value).flatten()
}

/// `Ok(None)` for blank input, an error for malformed input
pub(crate) fn optional_date(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
) -> Option<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(Some(date)),
        Err(_) => {
            errors.add(field, format!("Invalid date '{}', expected YYYY-MM-DD", value));
            None
        }
    }
}
