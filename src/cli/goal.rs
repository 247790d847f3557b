//! Savings goal CLI commands

use clap::Subcommand;

use super::today;
use crate::display::{format_goal_details, format_goal_table};
use crate::error::TrackerResult;
use crate::forms::{ContributionForm, SavingsGoalForm};
use crate::services::SavingsGoalService;
use crate::session::Session;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List savings goals with progress and pace
    List,

    /// Show one goal
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Create a savings goal
    Create {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Linked category (defaults to the savings category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit a goal
    Edit {
        /// Goal name or ID
        goal: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Move money from the savings envelope into a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        /// Amount to contribute
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(session: &Session, cmd: GoalCommands) -> TrackerResult<()> {
    let service = SavingsGoalService::new(session);
    let today = today();

    match cmd {
        GoalCommands::List => {
            let goals = service.list()?;
            print!("{}", format_goal_table(&goals, today));
        }

        GoalCommands::Show { goal } => {
            let goal = service.find(&goal)?;
            print!("{}", format_goal_details(&goal, today));
        }

        GoalCommands::Create {
            name,
            target,
            date,
            category,
        } => {
            let form = SavingsGoalForm {
                name,
                target_amount: target,
                target_date: date,
                category_name: category.unwrap_or_else(|| session.settings.savings_category.clone()),
            };
            let payload = form.validate(today)?;
            let created = service.create(&payload)?;
            println!("Created goal: {}", created);
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            date,
        } => {
            let existing = service.find(&goal)?;
            let mut form = SavingsGoalForm::from_goal(&existing);
            if let Some(v) = name {
                form.name = v;
            }
            if let Some(v) = target {
                form.target_amount = v;
            }
            if let Some(v) = date {
                form.target_date = v;
            }
            // An unchanged past date stays acceptable
            let payload = form.validate(today.min(existing.target_date))?;
            let updated = service.update(existing.id, &payload)?;
            println!("Updated goal: {}", updated);
        }

        GoalCommands::Contribute { goal, amount } => {
            let existing = service.find(&goal)?;
            let payload = ContributionForm { amount }.validate()?;
            let updated = service.contribute(existing.id, payload.amount)?;
            println!("Contributed {} to {}.", payload.amount, updated.name);
            print!("{}", format_goal_details(&updated, today));
        }

        GoalCommands::Delete { goal } => {
            let existing = service.find(&goal)?;
            service.delete(existing.id)?;
            println!("Deleted goal: {}", existing.name);
        }
    }

    Ok(())
}
