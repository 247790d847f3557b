//! Recurring template display formatting
//!
//! Due labels are computed against the caller's "today", not taken from the
//! server's `is_overdue`/`days_until_next` snapshot.

use chrono::NaiveDate;
use tabled::Tabled;

use super::render_table;
use crate::budget::{preview_occurrences, DueBucket};
use crate::models::{ProcessOverdueResult, RecurringTransaction, CURRENCY_SYMBOL};

/// Dates shown in the detail preview
const PREVIEW_COUNT: usize = 5;

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Next")]
    next: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn due_label(bucket: DueBucket) -> String {
    match bucket {
        DueBucket::Overdue(days) => format!("⚠ Overdue ({}d)", days),
        b if b.is_due_soon() => format!("• {}", b),
        b => b.to_string(),
    }
}

pub fn format_recurring_table(templates: &[RecurringTransaction], today: NaiveDate) -> String {
    let rows = templates
        .iter()
        .map(|rec| RecurringRow {
            id: rec.id.to_string(),
            name: rec.name.clone(),
            amount: rec
                .amount
                .format_signed(rec.transaction_type.is_income(), CURRENCY_SYMBOL),
            frequency: rec.frequency.label().to_string(),
            next: rec.next_occurrence.format("%Y-%m-%d").to_string(),
            due: due_label(DueBucket::of(rec, today)),
            status: rec.status.to_string(),
        })
        .collect();
    render_table(rows, "No recurring transactions found.")
}

pub fn format_recurring_details(rec: &RecurringTransaction, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Recurring: {}\n", rec.name));
    output.push_str(&format!("  ID:          {}\n", rec.id));
    if !rec.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", rec.description));
    }
    output.push_str(&format!(
        "  Amount:      {}\n",
        rec.amount
            .format_signed(rec.transaction_type.is_income(), CURRENCY_SYMBOL)
    ));
    output.push_str(&format!("  Category:    {}\n", rec.category));
    output.push_str(&format!("  Frequency:   {}\n", rec.frequency.label()));
    output.push_str(&format!("  Status:      {}\n", rec.status));
    output.push_str(&format!("  Starts:      {}\n", rec.start_date.format("%Y-%m-%d")));
    if let Some(end) = rec.end_date {
        output.push_str(&format!("  Ends:        {}\n", end.format("%Y-%m-%d")));
    }
    match rec.max_occurrences {
        Some(max) => output.push_str(&format!("  Created:     {} of {}\n", rec.count_created, max)),
        None => output.push_str(&format!("  Created:     {}\n", rec.count_created)),
    }
    output.push_str(&format!(
        "  Next:        {} ({})\n",
        rec.next_occurrence.format("%Y-%m-%d"),
        DueBucket::of(rec, today)
    ));

    let upcoming = preview_occurrences(rec, PREVIEW_COUNT);
    if !upcoming.is_empty() {
        output.push_str("\n  Upcoming:\n");
        for date in upcoming {
            output.push_str(&format!("    - {}\n", date.format("%Y-%m-%d")));
        }
    }

    output
}

pub fn format_process_result(result: &ProcessOverdueResult) -> String {
    let mut output = String::new();
    match &result.message {
        Some(message) => output.push_str(&format!("{}\n", message)),
        None => output.push_str(&format!(
            "Created {} transaction(s).\n",
            result.transactions.len()
        )),
    }
    for txn in &result.transactions {
        output.push_str(&format!("  {}\n", txn));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money, RecurringId, RecurringStatus, TransactionType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn template(next: NaiveDate, status: RecurringStatus) -> RecurringTransaction {
        RecurringTransaction {
            id: RecurringId::new(4),
            user: None,
            name: "Rent".into(),
            description: String::new(),
            amount: Money::from_cents(45_000),
            category: "Housing".into(),
            transaction_type: TransactionType::Expense,
            frequency: Frequency::Monthly,
            start_date: d(2025, 1, 1),
            end_date: None,
            next_occurrence: next,
            status,
            count_created: 2,
            max_occurrences: Some(3),
            last_created: None,
            is_overdue: false,
            days_until_next: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_table_reclassifies_locally() {
        let output = format_recurring_table(
            &[template(d(2025, 3, 1), RecurringStatus::Active)],
            d(2025, 3, 4),
        );
        assert!(output.contains("Overdue (3d)"));
    }

    #[test]
    fn test_paused_past_date_shows_days_ago() {
        let output = format_recurring_table(
            &[template(d(2025, 3, 1), RecurringStatus::Paused)],
            d(2025, 3, 4),
        );
        assert!(output.contains("3 days ago"));
        assert!(!output.contains("Overdue"));
    }

    #[test]
    fn test_details_preview_respects_max() {
        let output = format_recurring_details(
            &template(d(2025, 3, 1), RecurringStatus::Active),
            d(2025, 2, 27),
        );
        assert!(output.contains("2 of 3"));
        assert!(output.contains("2025-03-01"));
        assert!(!output.contains("2025-04-01"));
    }
}
