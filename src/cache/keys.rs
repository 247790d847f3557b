//! Typed cache keys and invalidation scopes
//!
//! Every cached query has a [`CacheKey`]; keys belong to a [`CacheScope`];
//! each [`Mutation`] names the scopes it makes stale.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ComparisonKind, EnvelopeId};

/// Group of cache entries invalidated together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheScope {
    Transactions,
    Balance,
    Income,
    Categories,
    Envelopes,
    EnvelopeSummary,
    SavingsGoals,
    Recurring,
    Upcoming,
    Overdue,
    Reports,
}

impl CacheScope {
    pub const ALL: [CacheScope; 11] = [
        Self::Transactions,
        Self::Balance,
        Self::Income,
        Self::Categories,
        Self::Envelopes,
        Self::EnvelopeSummary,
        Self::SavingsGoals,
        Self::Recurring,
        Self::Upcoming,
        Self::Overdue,
        Self::Reports,
    ];
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transactions => "transactions",
            Self::Balance => "balance",
            Self::Income => "income",
            Self::Categories => "categories",
            Self::Envelopes => "envelopes",
            Self::EnvelopeSummary => "envelope summary",
            Self::SavingsGoals => "savings goals",
            Self::Recurring => "recurring",
            Self::Upcoming => "upcoming",
            Self::Overdue => "overdue",
            Self::Reports => "reports",
        };
        f.write_str(name)
    }
}

/// Identity of one cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheKey {
    Transactions,
    Balance,
    Income,
    Categories,
    Envelopes,
    Envelope(EnvelopeId),
    EnvelopeSummary,
    SavingsGoals,
    Recurring,
    RecurringUpcoming,
    RecurringOverdue,
    MonthlyReport { year: Option<i32>, month: Option<u32> },
    YearlyReport { year: Option<i32> },
    ComparisonReport { kind: ComparisonKind },
}

impl CacheKey {
    pub fn scope(&self) -> CacheScope {
        match self {
            Self::Transactions => CacheScope::Transactions,
            Self::Balance => CacheScope::Balance,
            Self::Income => CacheScope::Income,
            Self::Categories => CacheScope::Categories,
            Self::Envelopes | Self::Envelope(_) => CacheScope::Envelopes,
            Self::EnvelopeSummary => CacheScope::EnvelopeSummary,
            Self::SavingsGoals => CacheScope::SavingsGoals,
            Self::Recurring => CacheScope::Recurring,
            Self::RecurringUpcoming => CacheScope::Upcoming,
            Self::RecurringOverdue => CacheScope::Overdue,
            Self::MonthlyReport { .. } | Self::YearlyReport { .. } | Self::ComparisonReport { .. } => {
                CacheScope::Reports
            }
        }
    }

    /// How long a fetched value may be served without refetching
    pub fn stale_time(&self) -> Duration {
        match self {
            Self::Balance | Self::RecurringOverdue => Duration::minutes(1),
            Self::Transactions | Self::RecurringUpcoming | Self::ComparisonReport { .. } => {
                Duration::minutes(2)
            }
            Self::YearlyReport { .. } => Duration::minutes(10),
            _ => Duration::minutes(5),
        }
    }

    /// Stable string used as the on-disk map key
    pub fn storage_key(&self) -> String {
        fn opt<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "current".to_string(), |v| v.to_string())
        }

        match self {
            Self::Transactions => "transactions".into(),
            Self::Balance => "balance".into(),
            Self::Income => "income".into(),
            Self::Categories => "categories".into(),
            Self::Envelopes => "envelopes".into(),
            Self::Envelope(id) => format!("envelopes/{}", id),
            Self::EnvelopeSummary => "envelopes/summary".into(),
            Self::SavingsGoals => "savings-goals".into(),
            Self::Recurring => "recurring".into(),
            Self::RecurringUpcoming => "recurring/upcoming".into(),
            Self::RecurringOverdue => "recurring/overdue".into(),
            Self::MonthlyReport { year, month } => {
                format!("reports/monthly/{}/{}", opt(*year), opt(*month))
            }
            Self::YearlyReport { year } => format!("reports/yearly/{}", opt(*year)),
            Self::ComparisonReport { kind } => format!("reports/comparison/{}", kind),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// A successful write and the cached data it affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    TransactionChanged,
    CategoryChanged,
    EnvelopeChanged,
    GoalChanged,
    GoalContributed,
    RecurringChanged,
    /// Create-now or process-overdue produced real transactions
    RecurringGenerated,
    RecurringSkipped,
    ReportsRefreshed,
}

impl Mutation {
    pub fn invalidates(&self) -> &'static [CacheScope] {
        use CacheScope::*;
        match self {
            Self::TransactionChanged => &[
                Transactions,
                Balance,
                Income,
                Envelopes,
                EnvelopeSummary,
                Reports,
            ],
            Self::CategoryChanged => &[Categories],
            Self::EnvelopeChanged => &[Envelopes, EnvelopeSummary, Income],
            Self::GoalChanged => &[SavingsGoals],
            Self::GoalContributed => &[
                SavingsGoals,
                Transactions,
                Balance,
                Income,
                Envelopes,
                EnvelopeSummary,
            ],
            Self::RecurringChanged | Self::RecurringSkipped => &[Recurring, Upcoming, Overdue],
            Self::RecurringGenerated => &[
                Recurring,
                Upcoming,
                Overdue,
                Transactions,
                Balance,
                Income,
                Envelopes,
                EnvelopeSummary,
                Reports,
            ],
            Self::ReportsRefreshed => &[Reports],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_times() {
        assert_eq!(CacheKey::Transactions.stale_time(), Duration::minutes(2));
        assert_eq!(CacheKey::Balance.stale_time(), Duration::minutes(1));
        assert_eq!(CacheKey::Categories.stale_time(), Duration::minutes(5));
        assert_eq!(CacheKey::RecurringOverdue.stale_time(), Duration::minutes(1));
        assert_eq!(
            CacheKey::YearlyReport { year: Some(2025) }.stale_time(),
            Duration::minutes(10)
        );
        assert_eq!(
            CacheKey::MonthlyReport { year: None, month: None }.stale_time(),
            Duration::minutes(5)
        );
    }

    #[test]
    fn test_report_keys_are_distinct() {
        let march = CacheKey::MonthlyReport { year: Some(2025), month: Some(3) };
        let april = CacheKey::MonthlyReport { year: Some(2025), month: Some(4) };
        assert_ne!(march.storage_key(), april.storage_key());
        assert_eq!(march.storage_key(), "reports/monthly/2025/3");
        assert_eq!(
            CacheKey::MonthlyReport { year: None, month: None }.storage_key(),
            "reports/monthly/current/current"
        );
        assert_eq!(march.scope(), CacheScope::Reports);
    }

    #[test]
    fn test_transaction_mutation_invalidates_aggregates() {
        let scopes = Mutation::TransactionChanged.invalidates();
        for scope in [
            CacheScope::Transactions,
            CacheScope::Balance,
            CacheScope::Envelopes,
            CacheScope::EnvelopeSummary,
            CacheScope::Reports,
        ] {
            assert!(scopes.contains(&scope), "missing {}", scope);
        }
        assert!(!scopes.contains(&CacheScope::Categories));
    }

    #[test]
    fn test_single_envelope_shares_envelope_scope() {
        assert_eq!(CacheKey::Envelope(EnvelopeId::new(4)).scope(), CacheScope::Envelopes);
        assert!(Mutation::EnvelopeChanged
            .invalidates()
            .contains(&CacheScope::Envelopes));
    }
}
