//! Fixed seed data for the sample-data path
//!
//! Used when no statement has been uploaded yet: the dashboard runs the
//! categorization stage against this set so the user can explore the UI
//! without handing over a real statement.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Transaction, TransactionType};

/// The sample statement: one summer of spending plus a few deposits.
///
/// Ids are generated fresh on every call, like every other transaction in
/// the system.
pub fn sample_transactions() -> Vec<Transaction> {
    const ROWS: &[(&str, &str, f64, TransactionType)] = &[
        ("2024-07-15", "Salary Deposit", 5000.0, TransactionType::Income),
        ("2024-07-20", "Trader Joe's", -120.5, TransactionType::Expense),
        ("2024-07-20", "PG&E Bill", -85.7, TransactionType::Expense),
        ("2024-07-21", "Netflix Subscription", -15.99, TransactionType::Expense),
        ("2024-07-22", "United Airlines", -450.0, TransactionType::Expense),
        ("2024-07-22", "Starbucks", -5.75, TransactionType::Expense),
        ("2024-07-23", "Amazon.com", -45.99, TransactionType::Expense),
        ("2024-07-24", "Comcast Internet", -70.0, TransactionType::Expense),
        ("2024-07-25", "Cheesecake Factory", -95.2, TransactionType::Expense),
        ("2024-07-26", "Whole Foods", -88.3, TransactionType::Expense),
        ("2024-07-28", "AMC Theatres", -35.0, TransactionType::Expense),
        ("2024-07-30", "Freelance Project Payment", 1200.0, TransactionType::Income),
        ("2024-08-01", "T-Mobile Bill", -110.0, TransactionType::Expense),
        ("2024-08-02", "Zara", -150.0, TransactionType::Expense),
        ("2024-08-03", "Sweetgreen", -14.5, TransactionType::Expense),
        ("2024-08-05", "Safeway", -65.4, TransactionType::Expense),
        ("2024-08-07", "Airbnb", -800.0, TransactionType::Expense),
        ("2024-08-10", "Rent Payment", -2500.0, TransactionType::Expense),
        ("2024-08-12", "Etsy Sale", 75.5, TransactionType::Income),
        ("2024-08-14", "Apple Store", -999.0, TransactionType::Expense),
    ];

    ROWS.iter()
        .map(|&(date, description, amount, transaction_type)| Transaction {
            id: Uuid::new_v4().to_string(),
            date: date.parse::<NaiveDate>().expect("sample date is valid"),
            description: description.to_string(),
            amount,
            transaction_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_twenty_rows() {
        assert_eq!(sample_transactions().len(), 20);
    }

    #[test]
    fn test_sample_signs_match_types() {
        for tx in sample_transactions() {
            match tx.transaction_type {
                TransactionType::Income => assert!(tx.amount > 0.0, "{}", tx.description),
                TransactionType::Expense => assert!(tx.amount < 0.0, "{}", tx.description),
            }
        }
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let txs = sample_transactions();
        let mut ids: Vec<_> = txs.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), txs.len());
    }
}
