//! Funding allocator
//!
//! Distributes the available income pool across envelopes. Plans are pure
//! data; [`crate::services::FundingService`] validates and submits them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Envelope, EnvelopeId, Income, Money};

/// Description recorded on the funding expense transaction
pub fn funding_description(envelope_count: usize) -> String {
    format!("Envelope funding - {} envelopes", envelope_count)
}

/// Category used for the funding expense transaction
pub const FUNDING_CATEGORY: &str = "Envelope Funding";

/// Category used for single-envelope income allocations
pub const INCOME_ALLOCATION_CATEGORY: &str = "Income Allocation";

pub fn income_allocation_description(category_name: &str) -> String {
    format!("Income allocation to {}", category_name)
}

/// Automatic allocation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingStrategy {
    /// Least-funded envelopes first, never exceeding the pool
    SmartFill,
    /// Every envelope gets its full need, pool permitting or not
    FillToZero,
}

impl fmt::Display for FundingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmartFill => write!(f, "Smart fill"),
            Self::FillToZero => write!(f, "Fill to zero"),
        }
    }
}

/// One envelope's share of a funding plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingEntry {
    pub envelope_id: EnvelopeId,
    pub category_name: String,
    pub current_budgeted: Money,
    pub amount: Money,
}

impl FundingEntry {
    /// Budgeted amount after this entry is applied
    pub fn new_budgeted(&self) -> Money {
        self.current_budgeted + self.amount
    }
}

/// A proposed allocation of the pool to envelopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingPlan {
    pub pool: Money,
    entries: BTreeMap<EnvelopeId, FundingEntry>,
}

impl FundingPlan {
    pub fn new(pool: Money) -> Self {
        Self {
            pool,
            entries: BTreeMap::new(),
        }
    }

    /// Build a plan using one of the automatic strategies
    pub fn with_strategy(strategy: FundingStrategy, envelopes: &[Envelope], pool: Money) -> Self {
        match strategy {
            FundingStrategy::SmartFill => smart_fill(envelopes, pool),
            FundingStrategy::FillToZero => fill_to_zero(envelopes, pool),
        }
    }

    /// Set (or replace) the amount for one envelope
    pub fn set(&mut self, envelope: &Envelope, amount: Money) {
        self.entries.insert(
            envelope.id,
            FundingEntry {
                envelope_id: envelope.id,
                category_name: envelope.category_name.clone(),
                current_budgeted: envelope.budgeted_amount,
                amount,
            },
        );
    }

    pub fn remove(&mut self, id: EnvelopeId) -> Option<FundingEntry> {
        self.entries.remove(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: EnvelopeId) -> Option<&FundingEntry> {
        self.entries.get(&id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &FundingEntry> {
        self.entries.values()
    }

    /// Entries that will actually be submitted
    pub fn positive_entries(&self) -> impl Iterator<Item = &FundingEntry> {
        self.entries.values().filter(|e| e.amount.is_positive())
    }

    pub fn total(&self) -> Money {
        self.entries.values().map(|e| e.amount).sum()
    }

    /// Pool left after the plan; negative when over-allocated
    pub fn remaining_pool(&self) -> Money {
        self.pool - self.total()
    }

    pub fn is_empty(&self) -> bool {
        self.positive_entries().next().is_none()
    }

    /// Check the plan before anything is sent to the server
    pub fn validate(&self) -> TrackerResult<()> {
        if let Some(entry) = self.entries.values().find(|e| e.amount.is_negative()) {
            return Err(TrackerError::Validation(format!(
                "Funding amount for {} cannot be negative",
                entry.category_name
            )));
        }

        let total = self.total();
        if !total.is_positive() {
            return Err(TrackerError::Validation(
                "Enter an amount for at least one envelope".into(),
            ));
        }

        if total > self.pool {
            return Err(TrackerError::InsufficientFunds {
                available: self.pool,
                requested: total,
            });
        }

        Ok(())
    }
}

/// How much an envelope still needs; only positive needs are funded
fn need(envelope: &Envelope) -> Money {
    envelope.remaining()
}

/// budgeted / (budgeted + remaining), with a zero denominator treated as 1
fn funding_ratio(envelope: &Envelope) -> f64 {
    let budgeted = envelope.budgeted_amount.as_f64();
    let denominator = budgeted + envelope.remaining().as_f64();
    if denominator == 0.0 {
        budgeted
    } else {
        budgeted / denominator
    }
}

/// Fund the least-funded envelopes first until the pool runs out
///
/// The sum of allocations never exceeds `pool`.
pub fn smart_fill(envelopes: &[Envelope], pool: Money) -> FundingPlan {
    let mut ordered: Vec<&Envelope> = envelopes.iter().collect();
    ordered.sort_by(|a, b| {
        funding_ratio(a)
            .partial_cmp(&funding_ratio(b))
            .unwrap_or(Ordering::Equal)
    });

    let mut plan = FundingPlan::new(pool);
    let mut left = pool;

    for envelope in ordered {
        if !left.is_positive() {
            break;
        }
        let needed = need(envelope);
        if needed.is_positive() {
            let amount = needed.min(left);
            plan.set(envelope, amount);
            left -= amount;
        }
    }

    plan
}

/// Give every envelope exactly its need
///
/// The pool is not consulted; [`FundingPlan::validate`] reports any shortfall.
pub fn fill_to_zero(envelopes: &[Envelope], pool: Money) -> FundingPlan {
    let mut plan = FundingPlan::new(pool);
    for envelope in envelopes {
        let needed = need(envelope);
        if needed.is_positive() {
            plan.set(envelope, needed);
        }
    }
    plan
}

/// Amount needed to bring one envelope's budget up to `target`
pub fn quick_fill(envelope: &Envelope, target: Money) -> Option<Money> {
    let needed = target - envelope.budgeted_amount;
    needed.is_positive().then_some(needed)
}

/// Check a single-envelope allocation against the available income
pub fn validate_income_allocation(amount: Money, income: &Income) -> TrackerResult<()> {
    if !amount.is_positive() {
        return Err(TrackerError::Validation(
            "Allocation amount must be greater than zero".into(),
        ));
    }
    if amount > income.available_income {
        return Err(TrackerError::InsufficientFunds {
            available: income.available_income,
            requested: amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    fn m(units: i64) -> Money {
        Money::from_cents(units * 100)
    }

    fn envelope(id: i64, name: &str, budgeted: i64, spent: i64) -> Envelope {
        Envelope {
            id: EnvelopeId::new(id),
            user: None,
            category: CategoryId::new(id),
            category_name: name.into(),
            budgeted_amount: m(budgeted),
            spent_amount: m(spent),
            remaining_amount: None,
            percentage_used: None,
            is_over_budget: None,
            is_near_limit: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Envelope> {
        vec![
            // ratio 100 / 150
            envelope(1, "Rent", 100, 50),
            // ratio 200 / 390
            envelope(2, "Food", 200, 10),
            // over budget, no need
            envelope(3, "Fun", 50, 80),
        ]
    }

    #[test]
    fn test_smart_fill_prefers_least_funded() {
        let plan = smart_fill(&sample(), m(200));

        assert_eq!(plan.get(EnvelopeId::new(2)).unwrap().amount, m(190));
        assert_eq!(plan.get(EnvelopeId::new(1)).unwrap().amount, m(10));
        assert!(plan.get(EnvelopeId::new(3)).is_none());
        assert_eq!(plan.total(), m(200));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_smart_fill_never_exceeds_pool() {
        let envelopes = sample();
        for pool in [0, 1, 49, 50, 190, 239, 240, 241, 10_000] {
            let plan = smart_fill(&envelopes, m(pool));
            assert!(plan.total() <= m(pool), "pool {}", pool);
            assert!(!plan.remaining_pool().is_negative());
        }
    }

    #[test]
    fn test_smart_fill_with_ample_pool_covers_all_needs() {
        let plan = smart_fill(&sample(), m(1000));
        assert_eq!(plan.total(), m(240));
        assert_eq!(plan.remaining_pool(), m(760));
    }

    #[test]
    fn test_smart_fill_empty_pool_is_empty_plan() {
        let plan = smart_fill(&sample(), Money::zero());
        assert!(plan.is_empty());
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_fill_to_zero_ignores_pool_and_validation_catches_it() {
        let plan = fill_to_zero(&sample(), m(100));
        assert_eq!(plan.total(), m(240));

        match plan.validate() {
            Err(TrackerError::InsufficientFunds {
                available,
                requested,
            }) => {
                assert_eq!(available, m(100));
                assert_eq!(requested, m(240));
            }
            other => panic!("expected insufficient funds, got {:?}", other),
        }
    }

    #[test]
    fn test_quick_fill() {
        let env = envelope(1, "Rent", 100, 0);
        assert_eq!(quick_fill(&env, m(150)), Some(m(50)));
        assert_eq!(quick_fill(&env, m(100)), None);
        assert_eq!(quick_fill(&env, m(80)), None);
    }

    #[test]
    fn test_validate_rejects_negative_entry() {
        let envelopes = sample();
        let mut plan = FundingPlan::new(m(100));
        plan.set(&envelopes[0], m(50));
        plan.set(&envelopes[1], m(-10));
        assert!(matches!(plan.validate(), Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_entry_new_budgeted() {
        let envelopes = sample();
        let mut plan = FundingPlan::new(m(100));
        plan.set(&envelopes[0], m(25));
        assert_eq!(plan.get(EnvelopeId::new(1)).unwrap().new_budgeted(), m(125));
    }

    #[test]
    fn test_zero_denominator_ratio() {
        let env = envelope(9, "Zero", 0, 0);
        assert_eq!(funding_ratio(&env), 0.0);
    }

    #[test]
    fn test_income_allocation_guard() {
        let income = Income {
            total_income: m(1000),
            total_allocated: m(600),
            available_income: m(400),
        };
        assert!(validate_income_allocation(m(400), &income).is_ok());
        assert!(validate_income_allocation(Money::zero(), &income).is_err());
        assert!(matches!(
            validate_income_allocation(m(401), &income),
            Err(TrackerError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(funding_description(3), "Envelope funding - 3 envelopes");
        assert_eq!(
            income_allocation_description("Rent"),
            "Income allocation to Rent"
        );
    }
}
