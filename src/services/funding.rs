//! Funding service
//!
//! Validates funding plans against the income pool and applies them: one
//! envelope update per entry, then a single expense transaction recording
//! the total.

use chrono::{Local, NaiveDate};

use crate::budget::funding::{
    funding_description, income_allocation_description, validate_income_allocation,
    FUNDING_CATEGORY, INCOME_ALLOCATION_CATEGORY,
};
use crate::budget::{FundingPlan, FundingStrategy};
use crate::cache::Mutation;
use crate::error::TrackerResult;
use crate::models::{Envelope, EnvelopeId, Income, Money, Transaction, TransactionPayload, TransactionType};
use crate::services::{EnvelopeService, TransactionService};
use crate::session::Session;

/// What a submitted plan changed on the server
#[derive(Debug, Clone)]
pub struct FundingReceipt {
    pub envelopes: Vec<Envelope>,
    pub transaction: Transaction,
}

impl FundingReceipt {
    pub fn total(&self) -> Money {
        self.transaction.amount
    }
}

pub struct FundingService<'a> {
    session: &'a Session,
}

impl<'a> FundingService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn income(&self) -> TrackerResult<Income> {
        TransactionService::new(self.session).income()
    }

    /// Build a plan over the current envelopes and available income
    pub fn plan(&self, strategy: FundingStrategy) -> TrackerResult<FundingPlan> {
        let income = self.income()?;
        let envelopes = EnvelopeService::new(self.session).list()?;
        Ok(FundingPlan::with_strategy(
            strategy,
            &envelopes,
            income.available_income,
        ))
    }

    /// Empty plan against the current pool, for manual entries
    pub fn empty_plan(&self) -> TrackerResult<FundingPlan> {
        Ok(FundingPlan::new(self.income()?.available_income))
    }

    /// Validate and apply a plan, dated today
    ///
    /// Not atomic: envelopes are updated one request at a time, and a failure
    /// part way leaves the earlier envelopes re-budgeted with no funding
    /// transaction recorded.
    pub fn submit(&self, plan: &FundingPlan) -> TrackerResult<FundingReceipt> {
        self.submit_on(plan, Local::now().date_naive())
    }

    /// [`submit`](Self::submit) with an explicit transaction date
    pub fn submit_on(&self, plan: &FundingPlan, date: NaiveDate) -> TrackerResult<FundingReceipt> {
        plan.validate()?;

        let envelope_service = EnvelopeService::new(self.session);
        let mut envelopes = Vec::new();
        for entry in plan.positive_entries() {
            let updated = envelope_service.set_budgeted(entry.envelope_id, entry.new_budgeted())?;
            envelopes.push(updated);
        }

        let payload = TransactionPayload {
            date,
            description: funding_description(envelopes.len()),
            amount: plan.total(),
            category: FUNDING_CATEGORY.to_string(),
            transaction_type: TransactionType::Expense,
        };
        let transaction = TransactionService::new(self.session).create(&payload)?;

        tracing::info!(
            envelopes = envelopes.len(),
            total = %transaction.amount,
            "funding plan applied"
        );
        self.session.invalidate(Mutation::EnvelopeChanged)?;

        Ok(FundingReceipt {
            envelopes,
            transaction,
        })
    }

    /// Move `amount` of available income into one envelope
    pub fn allocate_income(&self, id: EnvelopeId, amount: Money) -> TrackerResult<FundingReceipt> {
        self.allocate_income_on(id, amount, Local::now().date_naive())
    }

    pub fn allocate_income_on(
        &self,
        id: EnvelopeId,
        amount: Money,
        date: NaiveDate,
    ) -> TrackerResult<FundingReceipt> {
        let income = self.income()?;
        validate_income_allocation(amount, &income)?;

        let envelope_service = EnvelopeService::new(self.session);
        let envelope = envelope_service.get(id)?;
        let updated = envelope_service.set_budgeted(id, envelope.budgeted_amount + amount)?;

        let payload = TransactionPayload {
            date,
            description: income_allocation_description(&updated.category_name),
            amount,
            category: INCOME_ALLOCATION_CATEGORY.to_string(),
            transaction_type: TransactionType::Income,
        };
        let transaction = TransactionService::new(self.session).create(&payload)?;

        tracing::info!(id = %id, amount = %amount, "income allocated");
        Ok(FundingReceipt {
            envelopes: vec![updated],
            transaction,
        })
    }
}
