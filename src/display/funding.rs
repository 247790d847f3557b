//! Funding plan display formatting

use tabled::Tabled;

use super::{format_bar, format_percentage, render_table};
use crate::budget::FundingPlan;
use crate::models::{Income, Money};
use crate::services::FundingReceipt;

#[derive(Tabled)]
struct FundingRow {
    #[tabled(rename = "Envelope")]
    envelope: String,
    #[tabled(rename = "Budgeted")]
    current: String,
    #[tabled(rename = "Adding")]
    amount: String,
    #[tabled(rename = "New budget")]
    new_budgeted: String,
}

/// Format the income pool available for funding
pub fn format_income(income: &Income) -> String {
    let mut output = String::new();
    output.push_str(&format!("Total income: {}\n", income.total_income));
    output.push_str(&format!("Allocated:    {}\n", income.total_allocated));
    output.push_str(&format!("Available:    {}\n", income.available_income));
    output.push_str(&format!(
        "              {} {}\n",
        format_bar(income.allocated_percentage(), 100.0, 20),
        format_percentage(income.allocated_percentage())
    ));
    output
}

/// Format a proposed plan and its running totals
pub fn format_funding_plan(plan: &FundingPlan) -> String {
    let rows = plan
        .positive_entries()
        .map(|entry| FundingRow {
            envelope: entry.category_name.clone(),
            current: entry.current_budgeted.to_string(),
            amount: entry.amount.to_string(),
            new_budgeted: entry.new_budgeted().to_string(),
        })
        .collect();

    let mut output = render_table(rows, "Nothing to fund.");
    output.push_str(&format!("Pool:      {}\n", plan.pool));
    output.push_str(&format!("Allocated: {}\n", plan.total()));
    let remaining = plan.remaining_pool();
    if remaining < Money::zero() {
        output.push_str(&format!("Shortfall: {}\n", -remaining));
    } else {
        output.push_str(&format!("Remaining: {}\n", remaining));
    }
    output
}

pub fn format_funding_receipt(receipt: &FundingReceipt) -> String {
    let mut output = format!(
        "Funded {} envelope(s) with {}.\n",
        receipt.envelopes.len(),
        receipt.total()
    );
    for envelope in &receipt.envelopes {
        output.push_str(&format!(
            "  {} now budgeted {}\n",
            envelope.category_name, envelope.budgeted_amount
        ));
    }
    output.push_str(&format!("Recorded: {}\n", receipt.transaction));
    output
}
