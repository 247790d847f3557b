//! Transaction model
//!
//! Transactions are owned by the backend. The client reads them, submits
//! create/update payloads, and never changes amounts on its own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of money flow; shared by transactions, categories and recurring templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A transaction as returned by `/transactions/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Username of the owner
    #[serde(default)]
    pub user: String,

    pub date: NaiveDate,

    pub description: String,

    pub amount: Money,

    /// Category name (transactions reference categories by name)
    pub category: String,

    pub transaction_type: TransactionType,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type.is_income()
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income()
    }

    /// Amount with its direction applied (income positive, expense negative)
    pub fn signed_amount(&self) -> Money {
        if self.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date,
            self.description,
            self.amount.format_signed(self.is_income(), super::money::CURRENCY_SYMBOL),
            self.category
        )
    }
}

/// Body for creating or replacing a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub transaction_type: TransactionType,
}

impl From<&Transaction> for TransactionPayload {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            description: txn.description.clone(),
            amount: txn.amount,
            category: txn.category.clone(),
            transaction_type: txn.transaction_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 12,
        "user": "mere",
        "date": "2025-03-14",
        "description": "Market",
        "amount": "1250.00",
        "category": "Groceries",
        "transaction_type": "expense",
        "created_at": "2025-03-14T09:30:00.123456Z",
        "updated_at": "2025-03-14T09:30:00Z"
    }"#;

    #[test]
    fn test_deserialize_backend_shape() {
        let txn: Transaction = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(txn.id, TransactionId::new(12));
        assert_eq!(txn.amount.cents(), 125000);
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount().cents(), -125000);
        assert!(txn.created_at.is_some());
    }

    #[test]
    fn test_payload_wire_format() {
        let txn: Transaction = serde_json::from_str(SAMPLE).unwrap();
        let payload = TransactionPayload::from(&txn);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["amount"], "1250.00");
        assert_eq!(value["date"], "2025-03-14");
        assert_eq!(value["transaction_type"], "expense");
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("out".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
