//! Transaction service
//!
//! CRUD over `/transactions/` plus the balance and income aggregates.

use chrono::NaiveDate;

use crate::cache::{CacheKey, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::models::category::find_matching;
use crate::models::{Balance, Income, Transaction, TransactionId, TransactionPayload, TransactionType};
use crate::session::Session;

/// Service for transaction management
pub struct TransactionService<'a> {
    session: &'a Session,
}

/// Client-side filter for transaction listings
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.transaction_type.is_some_and(|t| t != txn.transaction_type) {
            return false;
        }
        if let Some(category) = &self.category {
            if !txn.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if self.start_date.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| txn.date > end) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !txn.description.to_lowercase().contains(&needle)
                && !txn.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Filter, sort newest first, then truncate to `limit`
    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let mut result: Vec<_> = transactions.into_iter().filter(|t| self.matches(t)).collect();
        result.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn list(&self) -> TrackerResult<Vec<Transaction>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Transactions, || self.session.api.list_transactions())
    }

    pub fn list_filtered(&self, filter: &TransactionFilter) -> TrackerResult<Vec<Transaction>> {
        Ok(filter.apply(self.list()?))
    }

    pub fn get(&self, id: TransactionId) -> TrackerResult<Transaction> {
        self.list()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TrackerError::NotFound {
                entity_type: "Transaction",
                identifier: id.to_string(),
            })
    }

    /// Warning text when no category of the same type has this name
    ///
    /// Advisory only; the server decides whether to accept the transaction.
    pub fn category_warning(&self, payload: &TransactionPayload) -> TrackerResult<Option<String>> {
        let categories = super::CategoryService::new(self.session).list()?;
        if find_matching(&categories, &payload.category, payload.transaction_type).is_some() {
            return Ok(None);
        }
        Ok(Some(format!(
            "No {} category named '{}' exists",
            payload.transaction_type.as_str(),
            payload.category
        )))
    }

    pub fn create(&self, payload: &TransactionPayload) -> TrackerResult<Transaction> {
        let created = self.session.api.create_transaction(payload)?;
        tracing::info!(id = %created.id, amount = %created.amount, "transaction created");
        self.session.invalidate(Mutation::TransactionChanged)?;
        Ok(created)
    }

    pub fn update(&self, id: TransactionId, payload: &TransactionPayload) -> TrackerResult<Transaction> {
        let updated = self.session.api.update_transaction(id, payload)?;
        tracing::info!(id = %id, "transaction updated");
        self.session.invalidate(Mutation::TransactionChanged)?;
        Ok(updated)
    }

    pub fn delete(&self, id: TransactionId) -> TrackerResult<()> {
        self.session.api.delete_transaction(id)?;
        tracing::info!(id = %id, "transaction deleted");
        self.session.invalidate(Mutation::TransactionChanged)
    }

    pub fn balance(&self) -> TrackerResult<Balance> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Balance, || self.session.api.balance())
    }

    /// The funding pool
    pub fn income(&self) -> TrackerResult<Income> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Income, || self.session.api.income())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn txn(id: i64, date: (i32, u32, u32), desc: &str, category: &str, ty: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            user: "ana".into(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: desc.into(),
            amount: Money::from_cents(1000),
            category: category.into(),
            transaction_type: ty,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, (2025, 1, 5), "Salary", "Wages", TransactionType::Income),
            txn(2, (2025, 1, 7), "Market run", "Groceries", TransactionType::Expense),
            txn(3, (2025, 2, 1), "Rent Feb", "Housing", TransactionType::Expense),
            txn(4, (2025, 2, 1), "Bakery", "Groceries", TransactionType::Expense),
        ]
    }

    #[test]
    fn test_default_filter_sorts_newest_first() {
        let result = TransactionFilter::default().apply(sample());
        let ids: Vec<i64> = result.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_filter_by_type_and_category() {
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            category: Some("groceries".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(sample()).len(), 2);
    }

    #[test]
    fn test_filter_by_date_range_and_limit() {
        let filter = TransactionFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            limit: Some(2),
            ..Default::default()
        };
        let result = filter.apply(sample());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.id.get() != 1));
    }

    #[test]
    fn test_filter_search() {
        let filter = TransactionFilter {
            search: Some("rent".into()),
            ..Default::default()
        };
        let result = filter.apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.get(), 3);
    }
}
