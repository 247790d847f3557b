//! Savings goal service
//!
//! Goal targets and contributions are checked against the Savings envelope
//! before anything is sent.

use crate::budget::savings::{validate_contribution, validate_goal_target};
use crate::cache::{CacheKey, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ContributionPayload, GoalId, Money, SavingsGoal, SavingsGoalPayload};
use crate::services::EnvelopeService;
use crate::session::Session;

/// Service for savings goal management
pub struct SavingsGoalService<'a> {
    session: &'a Session,
}

impl<'a> SavingsGoalService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn savings_category(&self) -> &str {
        &self.session.settings.savings_category
    }

    pub fn list(&self) -> TrackerResult<Vec<SavingsGoal>> {
        self.session
            .cache
            .get_or_fetch(CacheKey::SavingsGoals, || self.session.api.list_savings_goals())
    }

    /// Find a goal by name (case-insensitive) or id
    pub fn find(&self, identifier: &str) -> TrackerResult<SavingsGoal> {
        let goals = self.list()?;
        let identifier = identifier.trim();

        if let Some(goal) = goals.iter().find(|g| g.name.eq_ignore_ascii_case(identifier)) {
            return Ok(goal.clone());
        }
        if let Ok(id) = identifier.parse::<GoalId>() {
            if let Some(goal) = goals.into_iter().find(|g| g.id == id) {
                return Ok(goal);
            }
        }
        Err(TrackerError::goal_not_found(identifier))
    }

    pub fn create(&self, payload: &SavingsGoalPayload) -> TrackerResult<SavingsGoal> {
        let envelopes = EnvelopeService::new(self.session).list()?;
        validate_goal_target(payload.target_amount, &envelopes, self.savings_category())?;

        let created = self.session.api.create_savings_goal(payload)?;
        tracing::info!(id = %created.id, name = %created.name, "savings goal created");
        self.session.invalidate(Mutation::GoalChanged)?;
        Ok(created)
    }

    pub fn update(&self, id: GoalId, payload: &SavingsGoalPayload) -> TrackerResult<SavingsGoal> {
        let envelopes = EnvelopeService::new(self.session).list()?;
        validate_goal_target(payload.target_amount, &envelopes, self.savings_category())?;

        let updated = self.session.api.update_savings_goal(id, payload)?;
        tracing::info!(id = %id, "savings goal updated");
        self.session.invalidate(Mutation::GoalChanged)?;
        Ok(updated)
    }

    pub fn delete(&self, id: GoalId) -> TrackerResult<()> {
        self.session.api.delete_savings_goal(id)?;
        tracing::info!(id = %id, "savings goal deleted");
        self.session.invalidate(Mutation::GoalChanged)
    }

    /// Contribute from the Savings envelope, then return the refreshed goal
    pub fn contribute(&self, id: GoalId, amount: Money) -> TrackerResult<SavingsGoal> {
        let envelopes = EnvelopeService::new(self.session).list()?;
        validate_contribution(amount, &envelopes, self.savings_category())?;

        self.session
            .api
            .contribute_to_goal(id, &ContributionPayload { amount })?;
        tracing::info!(id = %id, amount = %amount, "savings contribution recorded");
        self.session.invalidate(Mutation::GoalContributed)?;

        self.list()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| TrackerError::goal_not_found(id.to_string()))
    }
}
