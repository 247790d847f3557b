//! Recurring transaction templates
//!
//! The backend generates concrete transactions from these templates. The
//! client only displays them and triggers the action endpoints.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{RecurringId, UserId};
use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// How often a template fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Self::Daily,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
        Self::Bimonthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    /// The date one period after `date`
    ///
    /// Month-based frequencies clamp to the last day of shorter months
    /// (Jan 31 + 1 month = Feb 28/29). Returns `None` past chrono's range.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Biweekly => date.checked_add_days(Days::new(14)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Bimonthly => date.checked_add_months(Months::new(2)),
            Self::Quarterly => date.checked_add_months(Months::new(3)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Bimonthly => "Bi-monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        Self::ALL
            .into_iter()
            .find(|f| f.label().to_ascii_lowercase().replace('-', "") == key)
            .ok_or_else(|| format!("Unknown frequency: {}", s))
    }
}

/// Lifecycle state of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurringStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl fmt::Display for RecurringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for RecurringStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

/// A recurring template as returned by `/recurring-transactions/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: RecurringId,

    #[serde(default)]
    pub user: Option<UserId>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub amount: Money,

    pub category: String,

    pub transaction_type: TransactionType,

    pub frequency: Frequency,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    pub next_occurrence: NaiveDate,

    #[serde(default)]
    pub status: RecurringStatus,

    #[serde(default)]
    pub count_created: u32,

    #[serde(default)]
    pub max_occurrences: Option<u32>,

    #[serde(default)]
    pub last_created: Option<DateTime<Utc>>,

    /// Server's view at response time; the client reclassifies locally
    #[serde(default)]
    pub is_overdue: bool,

    #[serde(default)]
    pub days_until_next: i64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecurringTransaction {
    pub fn is_active(&self) -> bool {
        self.status == RecurringStatus::Active
    }

    /// Occurrences left before `max_occurrences` is hit, if capped
    pub fn remaining_occurrences(&self) -> Option<u32> {
        self.max_occurrences
            .map(|max| max.saturating_sub(self.count_created))
    }
}

impl fmt::Display for RecurringTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.name,
            self.frequency,
            self.transaction_type.as_str()
        )
    }
}

/// Body for creating or updating a recurring template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Money,
    pub category: String,
    pub transaction_type: TransactionType,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occurrences: Option<u32>,
    /// Only sent when pausing or resuming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecurringStatus>,
}

impl From<&RecurringTransaction> for RecurringPayload {
    fn from(rec: &RecurringTransaction) -> Self {
        Self {
            name: rec.name.clone(),
            description: (!rec.description.is_empty()).then(|| rec.description.clone()),
            amount: rec.amount,
            category: rec.category.clone(),
            transaction_type: rec.transaction_type,
            frequency: rec.frequency,
            start_date: rec.start_date,
            end_date: rec.end_date,
            max_occurrences: rec.max_occurrences,
            status: None,
        }
    }
}

/// Response of `POST /recurring-transactions/{id}/create_transaction/`
///
/// Accepts the transaction either bare or wrapped with a message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreateNowResponse {
    Wrapped {
        transaction: Transaction,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Transaction),
}

impl CreateNowResponse {
    pub fn into_transaction(self) -> Transaction {
        match self {
            Self::Wrapped { transaction, .. } | Self::Bare(transaction) => transaction,
        }
    }
}

/// Response of `POST /recurring-transactions/process_overdue/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProcessOverdueResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
