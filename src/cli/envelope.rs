//! Envelope CLI commands

use clap::Subcommand;

use crate::display::{format_envelope_details, format_envelope_table, format_envelope_totals};
use crate::error::{FieldErrors, TrackerError, TrackerResult};
use crate::forms::EnvelopeForm;
use crate::models::Money;
use crate::services::{CategoryService, EnvelopeService};
use crate::session::Session;

/// Envelope subcommands
#[derive(Subcommand)]
pub enum EnvelopeCommands {
    /// List envelopes with their budget status
    List,

    /// Show one envelope
    Show {
        /// Category name or envelope ID
        envelope: String,
    },

    /// Totals across all envelopes
    Summary,

    /// Create an envelope for a category
    Create {
        /// Category name or ID
        category: String,
        /// Initial budget
        #[arg(short, long, default_value = "0")]
        budget: String,
    },

    /// Set an envelope's budgeted amount
    Set {
        /// Category name or envelope ID
        envelope: String,
        /// New budgeted amount
        amount: String,
    },

    /// Delete an envelope
    Delete {
        /// Category name or envelope ID
        envelope: String,
    },
}

fn parse_budget(value: &str) -> TrackerResult<Money> {
    let amount = Money::parse(value).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.add("amount", e.to_string());
        TrackerError::Form(errors)
    })?;
    if amount.is_negative() {
        return Err(TrackerError::Validation(
            "Budgeted amount cannot be negative".into(),
        ));
    }
    Ok(amount)
}

/// Handle an envelope command
pub fn handle_envelope_command(session: &Session, cmd: EnvelopeCommands) -> TrackerResult<()> {
    let service = EnvelopeService::new(session);
    let threshold = session.near_limit_threshold();

    match cmd {
        EnvelopeCommands::List => {
            let envelopes = service.list()?;
            print!("{}", format_envelope_table(&envelopes, threshold));
        }

        EnvelopeCommands::Show { envelope } => {
            let found = service.find(&envelope)?;
            let fresh = service.get(found.id)?;
            print!("{}", format_envelope_details(&fresh, threshold));
        }

        EnvelopeCommands::Summary => {
            let totals = service.totals()?;
            print!("{}", format_envelope_totals(&totals));
        }

        EnvelopeCommands::Create { category, budget } => {
            let category = CategoryService::new(session).get(&category)?;
            let payload = EnvelopeForm {
                category: category.id.to_string(),
                budgeted_amount: budget,
            }
            .validate()?;
            let created = service.create(&payload)?;
            println!("Created envelope: {}", created);
        }

        EnvelopeCommands::Set { envelope, amount } => {
            let found = service.find(&envelope)?;
            let amount = parse_budget(&amount)?;
            let updated = service.set_budgeted(found.id, amount)?;
            println!(
                "{}: budgeted {} (was {})",
                updated.category_name, updated.budgeted_amount, found.budgeted_amount
            );
        }

        EnvelopeCommands::Delete { envelope } => {
            let found = service.find(&envelope)?;
            service.delete(found.id)?;
            println!("Deleted envelope: {}", found.category_name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget() {
        assert_eq!(parse_budget("VT 250").unwrap(), Money::from_cents(25_000));
        assert!(matches!(parse_budget("-1"), Err(TrackerError::Validation(_))));
        assert!(matches!(parse_budget("lots"), Err(TrackerError::Form(_))));
    }
}
