//! Transaction display formatting
//!
//! Register-style tables for transaction lists, a detail block for a single
//! transaction, and the account balance summary.

use tabled::Tabled;

use super::{render_table, truncate};
use crate::models::{Balance, Transaction, CURRENCY_SYMBOL};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: truncate(&txn.description, 32),
            category: txn.category.clone(),
            amount: txn.amount.format_signed(txn.is_income(), CURRENCY_SYMBOL),
        }
    }
}

/// Format a list of transactions as a register
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    let rows = transactions.iter().map(TransactionRow::from).collect();
    render_table(rows, "No transactions found.")
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_signed(txn.is_income(), CURRENCY_SYMBOL)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type));

    if let Some(created) = txn.created_at {
        output.push_str(&format!("Created:     {}\n", created.format("%Y-%m-%d %H:%M UTC")));
    }

    output
}

/// Format the `/balance/` totals
pub fn format_balance(balance: &Balance) -> String {
    let mut output = String::new();
    output.push_str("Balance\n");
    output.push_str(&format!("  Total income:     {:>16}\n", balance.total_income));
    output.push_str(&format!("  Total expenses:   {:>16}\n", balance.total_expenses));
    output.push_str(&format!("  Balance:          {:>16}\n", balance.balance));
    output.push('\n');
    output.push_str("This month\n");
    output.push_str(&format!("  Income:           {:>16}\n", balance.monthly_income));
    output.push_str(&format!("  Expenses:         {:>16}\n", balance.monthly_expenses));
    output.push_str(&format!("  Net:              {:>16}\n", balance.monthly_net()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId, TransactionType};
    use chrono::NaiveDate;

    fn txn(transaction_type: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::new(7),
            user: "sam".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            description: "Weekly groceries".into(),
            amount: Money::from_cents(4510),
            category: "Food".into(),
            transaction_type,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_table_signs_amounts() {
        let output = format_transaction_table(&[
            txn(TransactionType::Expense),
            txn(TransactionType::Income),
        ]);
        assert!(output.contains("- VT 45.10"));
        assert!(output.contains("+ VT 45.10"));
        assert!(output.contains("Weekly groceries"));
    }

    #[test]
    fn test_empty_table() {
        assert!(format_transaction_table(&[]).contains("No transactions found"));
    }

    #[test]
    fn test_balance() {
        let balance = Balance {
            total_income: Money::from_cents(500_000),
            total_expenses: Money::from_cents(320_050),
            balance: Money::from_cents(179_950),
            monthly_income: Money::from_cents(100_000),
            monthly_expenses: Money::from_cents(40_000),
        };
        let output = format_balance(&balance);
        assert!(output.contains("VT 1,799.50"));
        assert!(output.contains("VT 600.00"));
    }
}
