//! Typed wrappers for each REST resource
//!
//! Paths mirror the backend's router; ids are interpolated from the typed
//! id newtypes so a goal id can never hit an envelope URL.

use chrono::NaiveDate;
use serde::Serialize;

use super::client::{ApiClient, Download};
use crate::error::TrackerResult;
use crate::models::auth::{AccessToken, LoginRequest, RefreshRequest, RegisterRequest};
use crate::models::recurring::CreateNowResponse;
use crate::models::{
    AuthTokens, Balance, Category, CategoryId, CategoryPayload, ComparisonKind, ComparisonReport,
    ContributionPayload, CreateEnvelopePayload, Envelope, EnvelopeId, EnvelopeSummary,
    ExportFormat, GoalId, Income, MonthlyReport, ProcessOverdueResult, RecurringId,
    RecurringPayload, RecurringTransaction, SavingsGoal, SavingsGoalPayload, Transaction,
    TransactionId, TransactionPayload, UpdateEnvelopePayload, User, YearlyReport,
};

pub const TRANSACTIONS: &str = "/transactions/";
pub const BALANCE: &str = "/balance/";
pub const INCOME: &str = "/income/";
pub const CATEGORIES: &str = "/categories/";
pub const ENVELOPES: &str = "/envelopes/";
pub const ENVELOPE_SUMMARY: &str = "/envelopes/summary/";
pub const SAVINGS_GOALS: &str = "/savings-goals/";
pub const RECURRING: &str = "/recurring-transactions/";
pub const RECURRING_UPCOMING: &str = "/recurring-transactions/upcoming/";
pub const RECURRING_OVERDUE: &str = "/recurring-transactions/overdue/";
pub const RECURRING_PROCESS_OVERDUE: &str = "/recurring-transactions/process_overdue/";
pub const REPORT_MONTHLY: &str = "/reports/monthly/";
pub const REPORT_YEARLY: &str = "/reports/yearly/";
pub const REPORT_COMPARISON: &str = "/reports/comparison/";
pub const EXPORT: &str = "/export/";
pub const TOKEN: &str = "/token/";
pub const TOKEN_REFRESH: &str = "/token/refresh/";
pub const REGISTER: &str = "/register/";

fn item(collection: &str, id: impl std::fmt::Display) -> String {
    format!("{}{}/", collection, id)
}

fn action(collection: &str, id: impl std::fmt::Display, name: &str) -> String {
    format!("{}{}/{}/", collection, id, name)
}

#[derive(Serialize)]
struct MonthlyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<u32>,
}

#[derive(Serialize)]
struct YearlyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
}

#[derive(Serialize)]
struct ComparisonQuery {
    #[serde(rename = "type")]
    kind: ComparisonKind,
}

#[derive(Serialize)]
struct ExportQuery {
    format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

// Auth
impl ApiClient {
    pub fn login(&self, username: &str, password: &str) -> TrackerResult<AuthTokens> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post(TOKEN, &body)
    }

    /// Exchange a refresh token for a new access token
    pub fn refresh_token(&self, refresh: &str) -> TrackerResult<String> {
        let token: AccessToken = self.post(TOKEN_REFRESH, &RefreshRequest { refresh })?;
        Ok(token.access.clone())
    }

    pub fn register(&self, username: &str, email: &str, password: &str) -> TrackerResult<User> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post(REGISTER, &body)
    }
}

// Transactions and aggregates
impl ApiClient {
    pub fn list_transactions(&self) -> TrackerResult<Vec<Transaction>> {
        self.get_list(TRANSACTIONS)
    }

    pub fn create_transaction(&self, payload: &TransactionPayload) -> TrackerResult<Transaction> {
        self.post(TRANSACTIONS, payload)
    }

    pub fn update_transaction(
        &self,
        id: TransactionId,
        payload: &TransactionPayload,
    ) -> TrackerResult<Transaction> {
        self.put(&item(TRANSACTIONS, id), payload)
    }

    pub fn delete_transaction(&self, id: TransactionId) -> TrackerResult<()> {
        self.delete(&item(TRANSACTIONS, id))
    }

    pub fn balance(&self) -> TrackerResult<Balance> {
        self.get(BALANCE)
    }

    pub fn income(&self) -> TrackerResult<Income> {
        self.get(INCOME)
    }
}

// Categories
impl ApiClient {
    pub fn list_categories(&self) -> TrackerResult<Vec<Category>> {
        self.get_list(CATEGORIES)
    }

    pub fn create_category(&self, payload: &CategoryPayload) -> TrackerResult<Category> {
        self.post(CATEGORIES, payload)
    }

    pub fn update_category(&self, id: CategoryId, payload: &CategoryPayload) -> TrackerResult<Category> {
        self.put(&item(CATEGORIES, id), payload)
    }

    pub fn delete_category(&self, id: CategoryId) -> TrackerResult<()> {
        self.delete(&item(CATEGORIES, id))
    }
}

// Envelopes
impl ApiClient {
    pub fn list_envelopes(&self) -> TrackerResult<Vec<Envelope>> {
        self.get_list(ENVELOPES)
    }

    pub fn get_envelope(&self, id: EnvelopeId) -> TrackerResult<Envelope> {
        self.get(&item(ENVELOPES, id))
    }

    pub fn envelope_summary(&self) -> TrackerResult<EnvelopeSummary> {
        self.get(ENVELOPE_SUMMARY)
    }

    pub fn create_envelope(&self, payload: &CreateEnvelopePayload) -> TrackerResult<Envelope> {
        self.post(ENVELOPES, payload)
    }

    pub fn update_envelope(
        &self,
        id: EnvelopeId,
        payload: &UpdateEnvelopePayload,
    ) -> TrackerResult<Envelope> {
        self.put(&item(ENVELOPES, id), payload)
    }

    pub fn delete_envelope(&self, id: EnvelopeId) -> TrackerResult<()> {
        self.delete(&item(ENVELOPES, id))
    }
}

// Savings goals
impl ApiClient {
    pub fn list_savings_goals(&self) -> TrackerResult<Vec<SavingsGoal>> {
        self.get_list(SAVINGS_GOALS)
    }

    pub fn create_savings_goal(&self, payload: &SavingsGoalPayload) -> TrackerResult<SavingsGoal> {
        self.post(SAVINGS_GOALS, payload)
    }

    pub fn update_savings_goal(
        &self,
        id: GoalId,
        payload: &SavingsGoalPayload,
    ) -> TrackerResult<SavingsGoal> {
        self.put(&item(SAVINGS_GOALS, id), payload)
    }

    pub fn delete_savings_goal(&self, id: GoalId) -> TrackerResult<()> {
        self.delete(&item(SAVINGS_GOALS, id))
    }

    /// Record a contribution; the response body is not relied upon
    pub fn contribute_to_goal(&self, id: GoalId, payload: &ContributionPayload) -> TrackerResult<()> {
        let _: serde_json::Value = self.post(&action(SAVINGS_GOALS, id, "contribute"), payload)?;
        Ok(())
    }
}

// Recurring transactions
impl ApiClient {
    pub fn list_recurring(&self) -> TrackerResult<Vec<RecurringTransaction>> {
        self.get_list(RECURRING)
    }

    pub fn create_recurring(&self, payload: &RecurringPayload) -> TrackerResult<RecurringTransaction> {
        self.post(RECURRING, payload)
    }

    pub fn update_recurring(
        &self,
        id: RecurringId,
        payload: &RecurringPayload,
    ) -> TrackerResult<RecurringTransaction> {
        self.put(&item(RECURRING, id), payload)
    }

    pub fn delete_recurring(&self, id: RecurringId) -> TrackerResult<()> {
        self.delete(&item(RECURRING, id))
    }

    /// Generate the next occurrence now
    pub fn create_recurring_now(&self, id: RecurringId) -> TrackerResult<Transaction> {
        let response: CreateNowResponse = self.post_empty(&action(RECURRING, id, "create_transaction"))?;
        Ok(response.into_transaction())
    }

    pub fn skip_next_recurring(&self, id: RecurringId) -> TrackerResult<RecurringTransaction> {
        self.post_empty(&action(RECURRING, id, "skip_next"))
    }

    pub fn upcoming_recurring(&self) -> TrackerResult<Vec<RecurringTransaction>> {
        self.get_list(RECURRING_UPCOMING)
    }

    pub fn overdue_recurring(&self) -> TrackerResult<Vec<RecurringTransaction>> {
        self.get_list(RECURRING_OVERDUE)
    }

    pub fn process_overdue_recurring(&self) -> TrackerResult<ProcessOverdueResult> {
        self.post_empty(RECURRING_PROCESS_OVERDUE)
    }
}

// Reports
impl ApiClient {
    pub fn monthly_report(&self, year: Option<i32>, month: Option<u32>) -> TrackerResult<MonthlyReport> {
        self.get_with_query(REPORT_MONTHLY, &MonthlyQuery { year, month })
    }

    pub fn yearly_report(&self, year: Option<i32>) -> TrackerResult<YearlyReport> {
        self.get_with_query(REPORT_YEARLY, &YearlyQuery { year })
    }

    pub fn comparison_report(&self, kind: ComparisonKind) -> TrackerResult<ComparisonReport> {
        self.get_with_query(REPORT_COMPARISON, &ComparisonQuery { kind })
    }

    pub fn export_transactions(
        &self,
        format: ExportFormat,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> TrackerResult<Download> {
        self.download(
            EXPORT,
            &ExportQuery {
                format,
                start_date,
                end_date,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_and_action_paths() {
        assert_eq!(item(ENVELOPES, EnvelopeId::new(7)), "/envelopes/7/");
        assert_eq!(
            action(RECURRING, RecurringId::new(3), "skip_next"),
            "/recurring-transactions/3/skip_next/"
        );
    }

    #[test]
    fn test_export_query_omits_missing_dates() {
        let query = ExportQuery {
            format: ExportFormat::Csv,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: None,
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, serde_json::json!({"format": "csv", "start_date": "2025-01-01"}));
    }
}
