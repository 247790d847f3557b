//! Recurring transaction service
//!
//! Templates live on the server; create-now and skip-next are only offered
//! for active templates.

use crate::cache::{CacheKey, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    ProcessOverdueResult, RecurringId, RecurringPayload, RecurringStatus, RecurringTransaction,
    Transaction,
};
use crate::session::Session;

/// Service for recurring transaction templates
pub struct RecurringService<'a> {
    session: &'a Session,
}

impl<'a> RecurringService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn list(&self) -> TrackerResult<Vec<RecurringTransaction>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Recurring, || self.session.api.list_recurring())
    }

    pub fn get(&self, id: RecurringId) -> TrackerResult<RecurringTransaction> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| TrackerError::recurring_not_found(id.to_string()))
    }

    /// Find a template by name (case-insensitive) or id
    pub fn find(&self, identifier: &str) -> TrackerResult<RecurringTransaction> {
        let templates = self.list()?;
        let identifier = identifier.trim();

        if let Some(found) = templates
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(identifier))
        {
            return Ok(found.clone());
        }
        if let Ok(id) = identifier.parse::<RecurringId>() {
            if let Some(found) = templates.into_iter().find(|r| r.id == id) {
                return Ok(found);
            }
        }
        Err(TrackerError::recurring_not_found(identifier))
    }

    pub fn upcoming(&self) -> TrackerResult<Vec<RecurringTransaction>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::RecurringUpcoming, || self.session.api.upcoming_recurring())
    }

    pub fn overdue(&self) -> TrackerResult<Vec<RecurringTransaction>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::RecurringOverdue, || self.session.api.overdue_recurring())
    }

    pub fn create(&self, payload: &RecurringPayload) -> TrackerResult<RecurringTransaction> {
        let created = self.session.api.create_recurring(payload)?;
        tracing::info!(id = %created.id, name = %created.name, "recurring template created");
        self.session.invalidate(Mutation::RecurringChanged)?;
        Ok(created)
    }

    pub fn update(&self, id: RecurringId, payload: &RecurringPayload) -> TrackerResult<RecurringTransaction> {
        let updated = self.session.api.update_recurring(id, payload)?;
        tracing::info!(id = %id, "recurring template updated");
        self.session.invalidate(Mutation::RecurringChanged)?;
        Ok(updated)
    }

    /// Pause or resume a template by resending it with a new status
    pub fn set_status(&self, id: RecurringId, status: RecurringStatus) -> TrackerResult<RecurringTransaction> {
        let current = self.get(id)?;
        if current.status == RecurringStatus::Completed {
            return Err(TrackerError::Validation(format!(
                "'{}' is completed and cannot change status",
                current.name
            )));
        }
        let mut payload = RecurringPayload::from(&current);
        payload.status = Some(status);
        self.update(id, &payload)
    }

    pub fn delete(&self, id: RecurringId) -> TrackerResult<()> {
        self.session.api.delete_recurring(id)?;
        tracing::info!(id = %id, "recurring template deleted");
        self.session.invalidate(Mutation::RecurringChanged)
    }

    fn require_active(&self, id: RecurringId, action: &str) -> TrackerResult<RecurringTransaction> {
        let template = self.get(id)?;
        if !template.is_active() {
            return Err(TrackerError::Validation(format!(
                "Cannot {} '{}': template is {}",
                action,
                template.name,
                template.status.to_string().to_lowercase()
            )));
        }
        Ok(template)
    }

    /// Generate the next occurrence immediately
    pub fn create_transaction(&self, id: RecurringId) -> TrackerResult<Transaction> {
        self.require_active(id, "create a transaction from")?;
        let created = self.session.api.create_recurring_now(id)?;
        tracing::info!(id = %id, transaction = %created.id, "recurring occurrence created");
        self.session.invalidate(Mutation::RecurringGenerated)?;
        Ok(created)
    }

    pub fn skip_next(&self, id: RecurringId) -> TrackerResult<RecurringTransaction> {
        self.require_active(id, "skip")?;
        let updated = self.session.api.skip_next_recurring(id)?;
        tracing::info!(id = %id, next = %updated.next_occurrence, "recurring occurrence skipped");
        self.session.invalidate(Mutation::RecurringSkipped)?;
        Ok(updated)
    }

    /// Generate every overdue occurrence server-side
    pub fn process_overdue(&self) -> TrackerResult<ProcessOverdueResult> {
        let result = self.session.api.process_overdue_recurring()?;
        tracing::info!(created = result.transactions.len(), "overdue recurring processed");
        self.session.invalidate(Mutation::RecurringGenerated)?;
        Ok(result)
    }
}
