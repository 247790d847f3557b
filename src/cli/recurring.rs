//! Recurring transaction CLI commands

use clap::Subcommand;

use super::today;
use crate::display::{format_process_result, format_recurring_details, format_recurring_table};
use crate::error::TrackerResult;
use crate::forms::RecurringForm;
use crate::models::RecurringStatus;
use crate::services::RecurringService;
use crate::session::Session;

/// Recurring subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// List recurring templates
    List {
        /// Only templates the server reports as upcoming
        #[arg(long, conflicts_with = "overdue")]
        upcoming: bool,
        /// Only templates the server reports as overdue
        #[arg(long)]
        overdue: bool,
    },

    /// Show a template and its next occurrences
    Show {
        /// Template name or ID
        recurring: String,
    },

    /// Create a recurring template
    Create {
        /// Template name
        name: String,
        /// Amount per occurrence
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,
        /// daily, weekly, biweekly, monthly, bimonthly, quarterly, yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// First occurrence (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
        /// Last possible occurrence (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Stop after this many occurrences
        #[arg(short, long)]
        max: Option<u32>,
        /// Description copied onto generated transactions
        #[arg(long)]
        description: Option<String>,
    },

    /// Edit a template
    Edit {
        /// Template name or ID
        recurring: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        frequency: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        max: Option<u32>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Pause a template
    Pause {
        /// Template name or ID
        recurring: String,
    },

    /// Resume a paused template
    Resume {
        /// Template name or ID
        recurring: String,
    },

    /// Create the next occurrence now
    Run {
        /// Template name or ID
        recurring: String,
    },

    /// Skip the next occurrence
    Skip {
        /// Template name or ID
        recurring: String,
    },

    /// Create every overdue occurrence
    #[command(name = "process-overdue")]
    ProcessOverdue,

    /// Delete a template
    Delete {
        /// Template name or ID
        recurring: String,
    },
}

/// Handle a recurring command
pub fn handle_recurring_command(session: &Session, cmd: RecurringCommands) -> TrackerResult<()> {
    let service = RecurringService::new(session);
    let today = today();

    match cmd {
        RecurringCommands::List { upcoming, overdue } => {
            let templates = if upcoming {
                service.upcoming()?
            } else if overdue {
                service.overdue()?
            } else {
                service.list()?
            };
            print!("{}", format_recurring_table(&templates, today));
        }

        RecurringCommands::Show { recurring } => {
            let template = service.find(&recurring)?;
            print!("{}", format_recurring_details(&template, today));
        }

        RecurringCommands::Create {
            name,
            amount,
            category,
            transaction_type,
            frequency,
            start,
            end,
            max,
            description,
        } => {
            let form = RecurringForm {
                name,
                description: description.unwrap_or_default(),
                amount,
                category,
                transaction_type,
                frequency,
                start_date: start.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                end_date: end.unwrap_or_default(),
                max_occurrences: max.map(|m| m.to_string()).unwrap_or_default(),
            };
            let payload = form.validate()?;
            let created = service.create(&payload)?;
            println!("Created: {}", created);
            println!("  Next occurrence: {}", created.next_occurrence);
        }

        RecurringCommands::Edit {
            recurring,
            name,
            amount,
            category,
            frequency,
            end,
            max,
            description,
        } => {
            let existing = service.find(&recurring)?;
            let mut form = RecurringForm::from_recurring(&existing);
            if let Some(v) = name {
                form.name = v;
            }
            if let Some(v) = amount {
                form.amount = v;
            }
            if let Some(v) = category {
                form.category = v;
            }
            if let Some(v) = frequency {
                form.frequency = v;
            }
            if let Some(v) = end {
                form.end_date = v;
            }
            if let Some(v) = max {
                form.max_occurrences = v.to_string();
            }
            if let Some(v) = description {
                form.description = v;
            }
            let mut payload = form.validate()?;
            payload.status = Some(existing.status);
            let updated = service.update(existing.id, &payload)?;
            println!("Updated: {}", updated);
        }

        RecurringCommands::Pause { recurring } => {
            let existing = service.find(&recurring)?;
            let updated = service.set_status(existing.id, RecurringStatus::Paused)?;
            println!("Paused: {}", updated.name);
        }

        RecurringCommands::Resume { recurring } => {
            let existing = service.find(&recurring)?;
            let updated = service.set_status(existing.id, RecurringStatus::Active)?;
            println!("Resumed: {} (next {})", updated.name, updated.next_occurrence);
        }

        RecurringCommands::Run { recurring } => {
            let existing = service.find(&recurring)?;
            let created = service.create_transaction(existing.id)?;
            println!("Created: {}", created);
        }

        RecurringCommands::Skip { recurring } => {
            let existing = service.find(&recurring)?;
            let updated = service.skip_next(existing.id)?;
            println!(
                "Skipped {}; next occurrence is {}",
                existing.next_occurrence, updated.next_occurrence
            );
        }

        RecurringCommands::ProcessOverdue => {
            let result = service.process_overdue()?;
            print!("{}", format_process_result(&result));
        }

        RecurringCommands::Delete { recurring } => {
            let existing = service.find(&recurring)?;
            service.delete(existing.id)?;
            println!("Deleted: {}", existing.name);
        }
    }

    Ok(())
}
