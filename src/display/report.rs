//! Report formatting for terminal output

use tabled::Tabled;

use super::{format_bar, format_change, format_percentage, render_table, separator};
use crate::models::{ComparisonReport, Money, MonthlyReport, YearlyReport};

const WIDTH: usize = 60;

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: u32,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Envelope")]
    category: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Txns")]
    count: u32,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Change")]
    change: String,
}

fn title(text: &str) -> String {
    format!("{}\n{}\n", text, separator(WIDTH))
}

pub fn format_monthly_report(report: &MonthlyReport) -> String {
    let period = if report.period.month_name.is_empty() {
        format!("{}-{:02}", report.period.year, report.period.month)
    } else {
        format!("{} {}", report.period.month_name, report.period.year)
    };

    let mut output = title(&format!("Monthly report: {}", period));
    output.push_str(&format!("Income:       {}\n", report.summary.income));
    output.push_str(&format!("Expenses:     {}\n", report.summary.expenses));
    output.push_str(&format!("Net:          {}\n", report.summary.net));
    output.push_str(&format!("Transactions: {}\n\n", report.summary.transaction_count));

    output.push_str("Spending by category\n");
    let rows = report
        .category_breakdown
        .iter()
        .map(|share| ShareRow {
            category: share.category.clone(),
            amount: share.amount.to_string(),
            count: share.count,
            share: format!(
                "{} {}",
                format_bar(share.percentage, 100.0, 10),
                format_percentage(share.percentage)
            ),
        })
        .collect();
    output.push_str(&render_table(rows, "No spending this month."));

    if !report.envelope_performance.is_empty() {
        output.push_str("\nEnvelope performance\n");
        let rows = report
            .envelope_performance
            .iter()
            .map(|perf| PerformanceRow {
                category: perf.category.clone(),
                budgeted: perf.budgeted.to_string(),
                spent: perf.spent.to_string(),
                remaining: perf.remaining.to_string(),
                used: format_percentage(perf.percentage),
            })
            .collect();
        output.push_str(&render_table(rows, ""));
    }

    output
}

pub fn format_yearly_report(report: &YearlyReport) -> String {
    let mut output = title(&format!("Yearly report: {}", report.period.year));
    output.push_str(&format!("Income:       {}\n", report.summary.total_income));
    output.push_str(&format!("Expenses:     {}\n", report.summary.total_expenses));
    output.push_str(&format!("Net:          {}\n", report.summary.total_net));
    output.push_str(&format!("Transactions: {}\n\n", report.summary.transaction_count));

    let rows = report
        .monthly_breakdown
        .iter()
        .map(|m| MonthRow {
            month: if m.month_name.is_empty() {
                m.month.to_string()
            } else {
                m.month_name.clone()
            },
            income: m.income.to_string(),
            expenses: m.expenses.to_string(),
            net: m.net.to_string(),
            count: m.transaction_count,
        })
        .collect();
    output.push_str(&render_table(rows, "No activity this year."));

    if !report.top_categories.is_empty() {
        output.push_str("\nTop categories\n");
        let max = report
            .top_categories
            .iter()
            .map(|c| c.total)
            .max()
            .unwrap_or(Money::zero());
        for (rank, category) in report.top_categories.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {:<20} {:>16}  {}\n",
                rank + 1,
                category.category,
                category.total,
                format_bar(category.total.as_f64(), max.as_f64(), 15)
            ));
        }
    }

    output
}

pub fn format_comparison_report(report: &ComparisonReport) -> String {
    let mut output = title(&format!(
        "Comparison ({}): {} vs {}",
        report.period_type, report.current_period, report.previous_period
    ));

    let current = &report.current_stats;
    let previous = &report.previous_stats;
    let changes = &report.changes;
    let rows = vec![
        ComparisonRow {
            label: "Income".into(),
            current: current.income.to_string(),
            previous: previous.income.to_string(),
            change: format_change(changes.income_change),
        },
        ComparisonRow {
            label: "Expenses".into(),
            current: current.expenses.to_string(),
            previous: previous.expenses.to_string(),
            change: format_change(changes.expenses_change),
        },
        ComparisonRow {
            label: "Net".into(),
            current: current.net.to_string(),
            previous: previous.net.to_string(),
            change: format_change(changes.net_change),
        },
        ComparisonRow {
            label: "Transactions".into(),
            current: current.transaction_count.to_string(),
            previous: previous.transaction_count.to_string(),
            change: format_change(changes.transaction_count_change),
        },
    ];
    output.push_str(&render_table(rows, ""));

    if !report.category_comparison.is_empty() {
        output.push_str("\nBy category\n");
        let rows = report
            .category_comparison
            .iter()
            .map(|(name, cmp)| ComparisonRow {
                label: name.clone(),
                current: cmp.current.to_string(),
                previous: cmp.previous.to_string(),
                change: format_change(cmp.change),
            })
            .collect();
        output.push_str(&render_table(rows, ""));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monthly() {
        let report: MonthlyReport = serde_json::from_value(json!({
            "period": {"year": 2025, "month": 3, "month_name": "March"},
            "summary": {"income": 2500, "expenses": 1200.5, "net": 1299.5, "transaction_count": 14},
            "category_breakdown": [{"category": "Rent", "amount": 800, "count": 1, "percentage": 66.6}],
            "envelope_performance": [
                {"category": "Rent", "budgeted": 800, "spent": 800, "remaining": 0, "percentage": 100}
            ]
        }))
        .unwrap();
        let output = format_monthly_report(&report);
        assert!(output.contains("March 2025"));
        assert!(output.contains("VT 1,299.50"));
        assert!(output.contains("Envelope performance"));
    }

    #[test]
    fn test_comparison() {
        let report: ComparisonReport = serde_json::from_value(json!({
            "period_type": "monthly",
            "current_period": "2025-03",
            "previous_period": "2025-02",
            "current_stats": {"income": 100, "expenses": 50, "net": 50, "transaction_count": 4},
            "previous_stats": {"income": 80, "expenses": 60, "net": 20, "transaction_count": 5},
            "changes": {"income_change": 25.0, "expenses_change": -16.7, "net_change": 150.0,
                        "transaction_count_change": -20.0},
            "category_comparison": {"Food": {"current": 30, "previous": 40, "change": -25.0}}
        }))
        .unwrap();
        let output = format_comparison_report(&report);
        assert!(output.contains("+25.0%"));
        assert!(output.contains("-16.7%"));
        assert!(output.contains("Food"));
    }
}
