//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::today;
use crate::display::{format_balance, format_transaction_details, format_transaction_table};
use crate::error::TrackerResult;
use crate::forms::TransactionForm;
use crate::models::{TransactionId, TransactionType};
use crate::services::{TransactionFilter, TransactionService};
use crate::session::Session;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, newest first
    List {
        /// Only income or expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Text to look for in description or category
        #[arg(short, long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a transaction
    Add {
        /// Description
        description: String,
        /// Amount (e.g., "45.10" or "VT 1,200")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
    },

    /// Show overall and monthly balance
    Balance,
}

/// Handle a transaction command
pub fn handle_transaction_command(session: &Session, cmd: TransactionCommands) -> TrackerResult<()> {
    let service = TransactionService::new(session);

    match cmd {
        TransactionCommands::List {
            transaction_type,
            category,
            from,
            to,
            search,
            limit,
        } => {
            let filter = TransactionFilter {
                transaction_type,
                category,
                start_date: from,
                end_date: to,
                search,
                limit: Some(limit),
            };
            let transactions = service.list_filtered(&filter)?;
            print!("{}", format_transaction_table(&transactions));
        }

        TransactionCommands::Add {
            description,
            amount,
            category,
            transaction_type,
            date,
        } => {
            let mut form = TransactionForm::new(today());
            form.description = description;
            form.amount = amount;
            form.category = category;
            form.transaction_type = transaction_type;
            if let Some(date) = date {
                form.date = date;
            }

            let payload = form.validate()?;
            if let Some(warning) = service.category_warning(&payload)? {
                println!("Warning: {}", warning);
            }
            let created = service.create(&payload)?;
            println!("Recorded: {}", created);
        }

        TransactionCommands::Show { id } => {
            let txn = service.get(id)?;
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            category,
            transaction_type,
            date,
        } => {
            let existing = service.get(id)?;
            let mut form = TransactionForm::from_transaction(&existing);
            if let Some(v) = description {
                form.description = v;
            }
            if let Some(v) = amount {
                form.amount = v;
            }
            if let Some(v) = category {
                form.category = v;
            }
            if let Some(v) = transaction_type {
                form.transaction_type = v;
            }
            if let Some(v) = date {
                form.date = v;
            }

            let payload = form.validate()?;
            if let Some(warning) = service.category_warning(&payload)? {
                println!("Warning: {}", warning);
            }
            let updated = service.update(id, &payload)?;
            println!("Updated: {}", updated);
        }

        TransactionCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted transaction {}", id);
        }

        TransactionCommands::Balance => {
            let balance = service.balance()?;
            print!("{}", format_balance(&balance));
        }
    }

    Ok(())
}
