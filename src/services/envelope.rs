//! Envelope service
//!
//! CRUD over `/envelopes/`, the summary aggregate, and lookups by category.

use crate::budget::EnvelopeTotals;
use crate::cache::{CacheKey, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    CategoryId, CreateEnvelopePayload, Envelope, EnvelopeId, EnvelopeSummary, Money,
    UpdateEnvelopePayload,
};
use crate::session::Session;

/// Service for envelope management
pub struct EnvelopeService<'a> {
    session: &'a Session,
}

impl<'a> EnvelopeService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn list(&self) -> TrackerResult<Vec<Envelope>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Envelopes, || self.session.api.list_envelopes())
    }

    pub fn get(&self, id: EnvelopeId) -> TrackerResult<Envelope> {
        self.session
            .cache
            .get_or_fetch(CacheKey::Envelope(id), || self.session.api.get_envelope(id))
            .map_err(|e| {
                if e.is_not_found() {
                    TrackerError::envelope_not_found(id.to_string())
                } else {
                    e
                }
            })
    }

    pub fn summary(&self) -> TrackerResult<EnvelopeSummary> {
        self.session
            .cache
            .get_or_fetch(CacheKey::EnvelopeSummary, || self.session.api.envelope_summary())
    }

    /// Totals recomputed locally from the envelope list
    pub fn totals(&self) -> TrackerResult<EnvelopeTotals> {
        let envelopes = self.list()?;
        Ok(EnvelopeTotals::from_envelopes(
            &envelopes,
            self.session.near_limit_threshold(),
        ))
    }

    pub fn find_by_category_name(&self, name: &str) -> TrackerResult<Option<Envelope>> {
        let name = name.trim();
        Ok(self
            .list()?
            .into_iter()
            .find(|e| e.category_name.eq_ignore_ascii_case(name)))
    }

    pub fn find_by_category(&self, category: CategoryId) -> TrackerResult<Option<Envelope>> {
        Ok(self.list()?.into_iter().find(|e| e.category == category))
    }

    /// Resolve a category name or envelope id
    pub fn find(&self, identifier: &str) -> TrackerResult<Envelope> {
        if let Some(envelope) = self.find_by_category_name(identifier)? {
            return Ok(envelope);
        }
        if let Ok(id) = identifier.parse::<EnvelopeId>() {
            if let Some(envelope) = self.list()?.into_iter().find(|e| e.id == id) {
                return Ok(envelope);
            }
        }
        Err(TrackerError::envelope_not_found(identifier))
    }

    pub fn create(&self, payload: &CreateEnvelopePayload) -> TrackerResult<Envelope> {
        if payload.budgeted_amount.is_negative() {
            return Err(TrackerError::Validation(
                "Budgeted amount cannot be negative".into(),
            ));
        }
        if let Some(existing) = self.find_by_category(payload.category)? {
            return Err(TrackerError::Duplicate {
                entity_type: "Envelope",
                identifier: existing.category_name,
            });
        }

        let created = self.session.api.create_envelope(payload)?;
        tracing::info!(id = %created.id, category = %created.category_name, "envelope created");
        self.session.invalidate(Mutation::EnvelopeChanged)?;
        Ok(created)
    }

    pub fn set_budgeted(&self, id: EnvelopeId, budgeted_amount: Money) -> TrackerResult<Envelope> {
        if budgeted_amount.is_negative() {
            return Err(TrackerError::Validation(
                "Budgeted amount cannot be negative".into(),
            ));
        }

        let updated = self
            .session
            .api
            .update_envelope(id, &UpdateEnvelopePayload { budgeted_amount })?;
        tracing::info!(id = %id, budgeted = %budgeted_amount, "envelope updated");
        self.session.invalidate(Mutation::EnvelopeChanged)?;
        Ok(updated)
    }

    pub fn delete(&self, id: EnvelopeId) -> TrackerResult<()> {
        self.session.api.delete_envelope(id)?;
        tracing::info!(id = %id, "envelope deleted");
        self.session.invalidate(Mutation::EnvelopeChanged)
    }
}
