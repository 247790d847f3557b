//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_table;
use crate::error::TrackerResult;
use crate::forms::CategoryForm;
use crate::models::TransactionType;
use crate::services::CategoryService;
use crate::session::Session;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or expense categories
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(session: &Session, cmd: CategoryCommands) -> TrackerResult<()> {
    let service = CategoryService::new(session);

    match cmd {
        CategoryCommands::List { transaction_type } => {
            let categories = match transaction_type {
                Some(t) => service.list_by_type(t)?,
                None => service.list()?,
            };
            print!("{}", format_category_table(&categories));
        }

        CategoryCommands::Create {
            name,
            transaction_type,
        } => {
            let payload = CategoryForm {
                name,
                transaction_type,
            }
            .validate()?;
            let created = service.create(&payload)?;
            println!("Created category: {}", created);
            println!("  ID: {}", created.id);
        }

        CategoryCommands::Rename { category, name } => {
            let existing = service.get(&category)?;
            let mut form = CategoryForm::from_category(&existing);
            form.name = name;
            let payload = form.validate()?;
            let updated = service.update(existing.id, &payload)?;
            println!("Renamed '{}' to '{}'", existing.name, updated.name);
        }

        CategoryCommands::Delete { category } => {
            let existing = service.get(&category)?;
            service.delete(existing.id)?;
            println!("Deleted category: {}", existing.name);
        }
    }

    Ok(())
}
