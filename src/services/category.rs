//! Category service

use crate::cache::{CacheKey, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, CategoryPayload, TransactionType};
use crate::session::Session;

/// Service for category management
pub struct CategoryService<'a> {
    session: &'a Session,
}

impl<'a> CategoryService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn list(&self) -> TrackerResult<Vec<Category>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Categories, || self.session.api.list_categories())
    }

    pub fn list_by_type(&self, transaction_type: TransactionType) -> TrackerResult<Vec<Category>> {
        let mut categories: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|c| c.transaction_type == transaction_type)
            .collect();
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(categories)
    }

    /// Find a category by name (case-insensitive) or numeric id
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Category>> {
        let categories = self.list()?;
        let identifier = identifier.trim();

        if let Some(found) = categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(identifier))
        {
            return Ok(Some(found.clone()));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return Ok(categories.into_iter().find(|c| c.id == id));
        }

        Ok(None)
    }

    pub fn get(&self, identifier: &str) -> TrackerResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| TrackerError::category_not_found(identifier))
    }

    pub fn create(&self, payload: &CategoryPayload) -> TrackerResult<Category> {
        let existing = self.list()?;
        if existing
            .iter()
            .any(|c| c.matches(&payload.name, payload.transaction_type))
        {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: payload.name.clone(),
            });
        }

        let created = self.session.api.create_category(payload)?;
        tracing::info!(id = %created.id, name = %created.name, "category created");
        self.session.invalidate(Mutation::CategoryChanged)?;
        Ok(created)
    }

    pub fn update(&self, id: CategoryId, payload: &CategoryPayload) -> TrackerResult<Category> {
        let existing = self.list()?;
        if existing
            .iter()
            .any(|c| c.id != id && c.matches(&payload.name, payload.transaction_type))
        {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: payload.name.clone(),
            });
        }

        let updated = self.session.api.update_category(id, payload)?;
        tracing::info!(id = %id, "category updated");
        self.session.invalidate(Mutation::CategoryChanged)?;
        Ok(updated)
    }

    pub fn delete(&self, id: CategoryId) -> TrackerResult<()> {
        self.session.api.delete_category(id)?;
        tracing::info!(id = %id, "category deleted");
        self.session.invalidate(Mutation::CategoryChanged)
    }
}
