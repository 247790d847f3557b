//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display:
//! tables via `tabled`, detail blocks, progress bars and status labels.

pub mod cache;
pub mod category;
pub mod envelope;
pub mod funding;
pub mod goal;
pub mod recurring;
pub mod report;
pub mod transaction;

pub use cache::format_cache_entries;
pub use category::format_category_table;
pub use envelope::{format_envelope_details, format_envelope_table, format_envelope_totals};
pub use funding::{format_funding_plan, format_funding_receipt, format_income};
pub use goal::{format_goal_details, format_goal_table};
pub use recurring::{format_process_result, format_recurring_details, format_recurring_table};
pub use report::{format_comparison_report, format_monthly_report, format_yearly_report};
pub use transaction::{format_balance, format_transaction_details, format_transaction_table};

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows as a rounded table, or `empty` when there are none
pub fn render_table<T: Tabled>(rows: Vec<T>, empty: &str) -> String {
    if rows.is_empty() {
        return format!("{}\n", empty);
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Signed percentage change ("+12.5%", "-3.0%")
pub fn format_change(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        name: &'static str,
        value: i32,
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(12.49), "+12.5%");
        assert_eq!(format_change(-3.0), "-3.0%");
        assert_eq!(format_change(0.0), "0.0%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(150.0, 100.0, 4), "████");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_render_table() {
        let out = render_table(vec![Row { name: "a", value: 1 }], "nothing");
        assert!(out.contains("name"));
        assert!(out.contains("value"));
        assert_eq!(render_table(Vec::<Row>::new(), "nothing"), "nothing\n");
    }
}
