//! Category form

use serde::{Deserialize, Serialize};

use super::required_text;
use crate::error::{FieldErrors, TrackerError, TrackerResult};
use crate::models::{Category, CategoryPayload, TransactionType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub transaction_type: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            transaction_type: category.transaction_type.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> TrackerResult<CategoryPayload> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", &self.name);
        let transaction_type = match self.transaction_type.parse::<TransactionType>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.add("transaction_type", e);
                None
            }
        };

        let (Some(name), Some(transaction_type)) = (name, transaction_type) else {
            return Err(TrackerError::Form(errors));
        };
        Ok(CategoryPayload {
            name,
            transaction_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        let form = CategoryForm {
            name: " Salary ".into(),
            transaction_type: "Income".into(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Salary");
        assert_eq!(payload.transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_invalid() {
        let form = CategoryForm::default();
        match form.validate() {
            Err(TrackerError::Form(errors)) => {
                assert!(errors.get("name").is_some());
                assert!(errors.get("transaction_type").is_some());
            }
            other => panic!("expected form errors, got {:?}", other),
        }
    }
}
