//! Envelope funding CLI commands
//!
//! Plans are printed first; nothing is sent unless `--apply` is given.

use clap::Subcommand;

use crate::budget::{quick_fill, FundingPlan, FundingStrategy};
use crate::display::{format_funding_plan, format_funding_receipt, format_income};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::services::{EnvelopeService, FundingService};
use crate::session::Session;

/// Funding subcommands
#[derive(Subcommand)]
pub enum FundCommands {
    /// Show the income available for funding
    Income,

    /// Fund the least-funded envelopes first, within the pool
    Smart {
        /// Submit the plan
        #[arg(long)]
        apply: bool,
    },

    /// Fund every envelope back to zero remaining
    #[command(name = "fill-zero")]
    FillZero {
        /// Submit the plan
        #[arg(long)]
        apply: bool,
    },

    /// Top one envelope up to a target budget
    Quick {
        /// Category name or envelope ID
        envelope: String,
        /// Target budgeted amount
        target: String,
        /// Submit the plan
        #[arg(long)]
        apply: bool,
    },

    /// Fund envelopes with explicit amounts
    Manual {
        /// Entries as ENVELOPE=AMOUNT (e.g., "Groceries=150")
        #[arg(required = true)]
        entries: Vec<String>,
        /// Submit the plan
        #[arg(long)]
        apply: bool,
    },

    /// Move available income into a single envelope
    Allocate {
        /// Category name or envelope ID
        envelope: String,
        /// Amount to allocate
        amount: String,
    },
}

fn parse_amount(value: &str) -> TrackerResult<Money> {
    Money::parse(value).map_err(|e| TrackerError::Validation(e.to_string()))
}

/// Split "Groceries=150" into its envelope and amount
fn parse_entry(entry: &str) -> TrackerResult<(&str, Money)> {
    let (envelope, amount) = entry.rsplit_once('=').ok_or_else(|| {
        TrackerError::Validation(format!("Expected ENVELOPE=AMOUNT, got '{}'", entry))
    })?;
    let envelope = envelope.trim();
    if envelope.is_empty() {
        return Err(TrackerError::Validation(format!(
            "Missing envelope in '{}'",
            entry
        )));
    }
    Ok((envelope, parse_amount(amount)?))
}

fn show_or_submit(service: &FundingService, plan: &FundingPlan, apply: bool) -> TrackerResult<()> {
    print!("{}", format_funding_plan(plan));

    if plan.is_empty() {
        return Ok(());
    }

    if !apply {
        println!();
        match plan.validate() {
            Ok(()) => println!("Run again with --apply to submit."),
            Err(e) => println!("Plan cannot be applied: {}", e),
        }
        return Ok(());
    }

    let receipt = service.submit(plan)?;
    println!();
    print!("{}", format_funding_receipt(&receipt));
    Ok(())
}

/// Handle a fund command
pub fn handle_fund_command(session: &Session, cmd: FundCommands) -> TrackerResult<()> {
    let service = FundingService::new(session);

    match cmd {
        FundCommands::Income => {
            let income = service.income()?;
            print!("{}", format_income(&income));
        }

        FundCommands::Smart { apply } => {
            let plan = service.plan(FundingStrategy::SmartFill)?;
            show_or_submit(&service, &plan, apply)?;
        }

        FundCommands::FillZero { apply } => {
            let plan = service.plan(FundingStrategy::FillToZero)?;
            show_or_submit(&service, &plan, apply)?;
        }

        FundCommands::Quick {
            envelope,
            target,
            apply,
        } => {
            let envelope = EnvelopeService::new(session).find(&envelope)?;
            let target = parse_amount(&target)?;
            let Some(amount) = quick_fill(&envelope, target) else {
                println!(
                    "{} is already budgeted {} (target {}).",
                    envelope.category_name, envelope.budgeted_amount, target
                );
                return Ok(());
            };

            let mut plan = service.empty_plan()?;
            plan.set(&envelope, amount);
            show_or_submit(&service, &plan, apply)?;
        }

        FundCommands::Manual { entries, apply } => {
            let envelope_service = EnvelopeService::new(session);
            let mut plan = service.empty_plan()?;
            for entry in &entries {
                let (identifier, amount) = parse_entry(entry)?;
                let envelope = envelope_service.find(identifier)?;
                plan.set(&envelope, amount);
            }
            show_or_submit(&service, &plan, apply)?;
        }

        FundCommands::Allocate { envelope, amount } => {
            let envelope = EnvelopeService::new(session).find(&envelope)?;
            let amount = parse_amount(&amount)?;
            let receipt = service.allocate_income(envelope.id, amount)?;
            print!("{}", format_funding_receipt(&receipt));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let (envelope, amount) = parse_entry("Dining Out = VT 1,500").unwrap();
        assert_eq!(envelope, "Dining Out");
        assert_eq!(amount, Money::from_cents(150_000));

        assert!(parse_entry("Groceries").is_err());
        assert!(parse_entry("=10").is_err());
        assert!(parse_entry("Groceries=abc").is_err());
    }
}
