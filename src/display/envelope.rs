//! Envelope display formatting
//!
//! Figures are always the locally recomputed [`EnvelopeStatus`], never the
//! server's derived fields.

use tabled::Tabled;

use super::{format_bar, format_percentage, render_table};
use crate::budget::{EnvelopeHealth, EnvelopeTotals};
use crate::models::Envelope;

const BAR_WIDTH: usize = 10;

#[derive(Tabled)]
struct EnvelopeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn health_marker(health: EnvelopeHealth) -> &'static str {
    match health {
        EnvelopeHealth::Healthy => "✓",
        EnvelopeHealth::NearLimit => "!",
        EnvelopeHealth::OverBudget => "✗",
    }
}

/// Format the envelope list with recomputed status
pub fn format_envelope_table(envelopes: &[Envelope], near_limit_threshold: f64) -> String {
    let rows = envelopes
        .iter()
        .map(|envelope| {
            let status = envelope.status(near_limit_threshold);
            EnvelopeRow {
                id: envelope.id.to_string(),
                category: envelope.category_name.clone(),
                budgeted: status.budgeted.to_string(),
                spent: status.spent.to_string(),
                remaining: status.remaining.to_string(),
                used: format!(
                    "{} {}",
                    format_bar(status.bar_percentage(), 100.0, BAR_WIDTH),
                    format_percentage(status.percentage_used)
                ),
                status: format!("{} {}", health_marker(status.health()), status.health()),
            }
        })
        .collect();
    render_table(rows, "No envelopes found.\n\nRun 'vatu envelope create' to add one.")
}

/// Format one envelope in detail
pub fn format_envelope_details(envelope: &Envelope, near_limit_threshold: f64) -> String {
    let status = envelope.status(near_limit_threshold);
    let mut output = String::new();

    output.push_str(&format!("Envelope: {}\n", envelope.category_name));
    output.push_str(&format!("  ID:        {}\n", envelope.id));
    output.push_str(&format!("  Category:  {}\n", envelope.category));
    output.push_str(&format!("  Budgeted:  {}\n", status.budgeted));
    output.push_str(&format!("  Spent:     {}\n", status.spent));
    output.push_str(&format!("  Remaining: {}\n", status.remaining));
    output.push_str(&format!(
        "  Used:      {} {}\n",
        format_bar(status.bar_percentage(), 100.0, 20),
        format_percentage(status.percentage_used)
    ));
    output.push_str(&format!("  Status:    {}\n", status.health()));

    if envelope.is_out_of_sync() {
        output.push_str("\n  Note: server figures differ from the recomputed ones.\n");
    }

    output
}

/// Format totals across all envelopes
pub fn format_envelope_totals(totals: &EnvelopeTotals) -> String {
    let mut output = String::new();
    output.push_str(&format!("Envelopes:   {}\n", totals.count));
    output.push_str(&format!("Budgeted:    {}\n", totals.budgeted));
    output.push_str(&format!("Spent:       {}\n", totals.spent));
    output.push_str(&format!("Remaining:   {}\n", totals.remaining));
    output.push_str(&format!(
        "Used:        {}\n",
        format_percentage(totals.percentage_used())
    ));
    if totals.over_budget_count > 0 {
        output.push_str(&format!("Over budget: {}\n", totals.over_budget_count));
    }
    if totals.near_limit_count > 0 {
        output.push_str(&format!("Near limit:  {}\n", totals.near_limit_count));
    }
    output
}
