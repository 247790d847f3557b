//! Server-computed reports
//!
//! Report payloads carry plain JSON numbers. Amounts are parsed into
//! [`Money`]; percentages stay `f64`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub month_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    #[serde(default)]
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: String,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePerformance {
    pub category: String,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
    #[serde(default)]
    pub percentage: f64,
}

/// `GET /reports/monthly/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub period: MonthPeriod,
    pub summary: MonthlySummary,
    #[serde(default)]
    pub category_breakdown: Vec<CategoryShare>,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyTotals>,
    #[serde(default)]
    pub envelope_performance: Vec<EnvelopePerformance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPeriod {
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_net: Money,
    #[serde(default)]
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub month: u32,
    #[serde(default)]
    pub month_name: String,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    #[serde(default)]
    pub transaction_count: u32,
}

/// One category's spend per month; month keys are whatever the server sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: String,
    #[serde(flatten)]
    pub months: BTreeMap<String, Money>,
}

impl CategoryTrend {
    pub fn total(&self) -> Money {
        self.months.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// `GET /reports/yearly/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyReport {
    pub period: YearPeriod,
    pub summary: YearlySummary,
    #[serde(default)]
    pub monthly_breakdown: Vec<MonthTotals>,
    #[serde(default)]
    pub category_trends: Vec<CategoryTrend>,
    #[serde(default)]
    pub top_categories: Vec<CategoryTotal>,
}

/// Period granularity for the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonKind {
    #[default]
    Monthly,
    Yearly,
}

impl ComparisonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            other => Err(format!("Unknown comparison type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
    #[serde(default)]
    pub transaction_count: u32,
}

/// Percentage change between the two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PeriodChanges {
    #[serde(default)]
    pub income_change: f64,
    #[serde(default)]
    pub expenses_change: f64,
    #[serde(default)]
    pub net_change: f64,
    #[serde(default)]
    pub transaction_count_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub current: Money,
    pub previous: Money,
    #[serde(default)]
    pub change: f64,
}

/// `GET /reports/comparison/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub period_type: ComparisonKind,
    pub current_period: String,
    pub previous_period: String,
    pub current_stats: PeriodStats,
    pub previous_stats: PeriodStats,
    #[serde(default)]
    pub changes: PeriodChanges,
    #[serde(default)]
    pub category_comparison: BTreeMap<String, CategoryComparison>,
}

/// Formats accepted by `GET /export/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unsupported export format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_report_from_numbers() {
        let report: MonthlyReport = serde_json::from_value(serde_json::json!({
            "period": {"year": 2025, "month": 3, "month_name": "March"},
            "summary": {"income": 2500.0, "expenses": 1200.5, "net": 1299.5, "transaction_count": 14},
            "category_breakdown": [
                {"category": "Rent", "amount": 800, "count": 1, "percentage": 66.6}
            ],
            "daily_breakdown": [
                {"date": "2025-03-01", "income": 0, "expenses": 800, "net": -800}
            ],
            "envelope_performance": [
                {"category": "Rent", "budgeted": 800, "spent": 800, "remaining": 0, "percentage": 100.0}
            ]
        }))
        .unwrap();

        assert_eq!(report.summary.net.cents(), 129950);
        assert_eq!(report.daily_breakdown[0].net.cents(), -80000);
        assert_eq!(report.period.month_name, "March");
    }

    #[test]
    fn test_category_trend_collects_month_keys() {
        let trend: CategoryTrend = serde_json::from_value(serde_json::json!({
            "category": "Groceries",
            "Jan": 120.5,
            "Feb": 99.5
        }))
        .unwrap();

        assert_eq!(trend.months.len(), 2);
        assert_eq!(trend.total().cents(), 22000);
    }

    #[test]
    fn test_comparison_changes_are_percentages() {
        let report: ComparisonReport = serde_json::from_value(serde_json::json!({
            "period_type": "monthly",
            "current_period": "March 2025",
            "previous_period": "February 2025",
            "current_stats": {"income": 1000, "expenses": 500, "net": 500, "transaction_count": 5},
            "previous_stats": {"income": 800, "expenses": 400, "net": 400, "transaction_count": 4},
            "changes": {"income_change": 25.0, "expenses_change": 25.0, "net_change": 25.0, "transaction_count_change": 25.0},
            "category_comparison": {
                "Food": {"current": 300, "previous": 200, "change": 50.0}
            }
        }))
        .unwrap();

        assert_eq!(report.period_type, ComparisonKind::Monthly);
        assert_eq!(report.changes.income_change, 25.0);
        assert_eq!(report.category_comparison["Food"].change, 50.0);
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
