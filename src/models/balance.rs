//! Account-wide aggregates: balance and the funding pool

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Totals returned by `/balance/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
}

impl Balance {
    /// Net movement for the current month
    pub fn monthly_net(&self) -> Money {
        self.monthly_income - self.monthly_expenses
    }
}

/// Income available for envelope funding, from `/income/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub total_income: Money,
    pub total_allocated: Money,
    pub available_income: Money,
}

impl Income {
    /// Share of total income already allocated, capped at 100
    pub fn allocated_percentage(&self) -> f64 {
        if self.total_income.is_zero() {
            return 0.0;
        }
        (self.total_allocated.as_f64() / self.total_income.as_f64() * 100.0).min(100.0)
    }
}
