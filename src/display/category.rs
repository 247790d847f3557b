//! Category display formatting

use tabled::Tabled;

use super::render_table;
use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    transaction_type: String,
}

/// Format categories, income first, then by name
pub fn format_category_table(categories: &[Category]) -> String {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| {
        b.transaction_type
            .is_income()
            .cmp(&a.transaction_type.is_income())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    let rows = sorted
        .into_iter()
        .map(|c| CategoryRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            transaction_type: c.transaction_type.to_string(),
        })
        .collect();
    render_table(rows, "No categories found.\n\nRun 'vatu category create' to add one.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionType};

    fn category(id: i64, name: &str, transaction_type: TransactionType) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.into(),
            user: None,
            transaction_type,
            created_at: None,
        }
    }

    #[test]
    fn test_income_listed_first() {
        let output = format_category_table(&[
            category(1, "Rent", TransactionType::Expense),
            category(2, "Salary", TransactionType::Income),
        ]);
        let salary = output.find("Salary").unwrap();
        let rent = output.find("Rent").unwrap();
        assert!(salary < rent);
    }

    #[test]
    fn test_empty() {
        assert!(format_category_table(&[]).contains("No categories found"));
    }
}
