//! Report service
//!
//! Reports are computed by the server and cached per period.

use chrono::{Local, NaiveDate};

use crate::api::Download;
use crate::cache::{CacheKey, Mutation};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ComparisonKind, ComparisonReport, ExportFormat, MonthlyReport, YearlyReport};
use crate::session::Session;

/// Service for server-side reports and exports
pub struct ReportService<'a> {
    session: &'a Session,
}

/// Default download name, e.g. `transactions_2025-03-01.csv`
pub fn export_filename(format: ExportFormat, today: NaiveDate) -> String {
    format!("transactions_{}.{}", today.format("%Y-%m-%d"), format.extension())
}

impl<'a> ReportService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Monthly report; `None` lets the server pick the current period
    pub fn monthly(&self, year: Option<i32>, month: Option<u32>) -> TrackerResult<MonthlyReport> {
        if month.is_some_and(|m| !(1..=12).contains(&m)) {
            return Err(TrackerError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month.unwrap_or_default()
            )));
        }
        self.session
            .cache
            .get_or_fetch(CacheKey::MonthlyReport { year, month }, || {
                self.session.api.monthly_report(year, month)
            })
    }

    pub fn yearly(&self, year: Option<i32>) -> TrackerResult<YearlyReport> {
        self.session
            .cache
            .get_or_fetch(CacheKey::YearlyReport { year }, || self.session.api.yearly_report(year))
    }

    pub fn comparison(&self, kind: ComparisonKind) -> TrackerResult<ComparisonReport> {
        self.session
            .cache
            .get_or_fetch(CacheKey::ComparisonReport { kind }, || {
                self.session.api.comparison_report(kind)
            })
    }

    /// Drop every cached report so the next read refetches
    pub fn refresh(&self) -> TrackerResult<()> {
        self.session.invalidate(Mutation::ReportsRefreshed)
    }

    /// Download transactions; the filename falls back to today's date
    pub fn export(
        &self,
        format: ExportFormat,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> TrackerResult<Download> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(TrackerError::Validation(
                    "Start date must be on or before end date".into(),
                ));
            }
        }

        let mut download = self
            .session
            .api
            .export_transactions(format, start_date, end_date)?;
        if download.filename.is_none() {
            download.filename = Some(export_filename(format, Local::now().date_naive()));
        }
        tracing::info!(bytes = download.bytes.len(), %format, "export downloaded");
        Ok(download)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(export_filename(ExportFormat::Csv, today), "transactions_2025-03-01.csv");
        assert_eq!(export_filename(ExportFormat::Json, today), "transactions_2025-03-01.json");
    }
}
