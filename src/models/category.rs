//! Category model
//!
//! Categories are typed (income or expense). Transactions refer to them by
//! name, envelopes by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::transaction::TransactionType;

/// A category as returned by `/categories/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(default)]
    pub user: Option<UserId>,

    #[serde(default)]
    pub transaction_type: TransactionType,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Whether a transaction with this name and type would match the category
    pub fn matches(&self, name: &str, transaction_type: TransactionType) -> bool {
        self.transaction_type == transaction_type && self.name.eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.transaction_type)
    }
}

/// Body for creating or renaming a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub transaction_type: TransactionType,
}

/// Find the category a transaction should belong to
pub fn find_matching<'a>(
    categories: &'a [Category],
    name: &str,
    transaction_type: TransactionType,
) -> Option<&'a Category> {
    categories.iter().find(|c| c.matches(name, transaction_type))
}
