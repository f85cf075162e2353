//! Dashboard aggregation
//!
//! Pure derived computations over the transaction collection: KPI totals and
//! per-category spending for the charts. Re-run whenever the collection
//! changes; nothing here mutates state.

use std::collections::HashMap;

use crate::models::{Category, CategorizedTransaction, CategorySpending, Summary, TransactionType};

/// Compute income/expense/net totals
///
/// Income sums signed amounts of income transactions; expenses sums absolute
/// amounts of expense transactions; net = income - expenses. Totals are
/// rounded to cents so repeated f64 addition does not leak into the API.
pub fn summarize(transactions: &[CategorizedTransaction]) -> Summary {
    let mut summary = transactions.iter().fold(Summary::default(), |mut acc, t| {
        match t.transaction_type {
            TransactionType::Income => acc.income += t.amount,
            TransactionType::Expense => acc.expenses += t.amount.abs(),
        }
        acc
    });

    summary.income = round_cents(summary.income);
    summary.expenses = round_cents(summary.expenses);
    summary.net = round_cents(summary.income - summary.expenses);
    summary
}

/// Per-category absolute spending, expenses only, sorted descending
///
/// Ties sort by category name so chart ordering is deterministic.
pub fn category_spending(transactions: &[CategorizedTransaction]) -> Vec<CategorySpending> {
    let mut by_category: HashMap<Category, f64> = HashMap::new();

    for t in transactions {
        if t.transaction_type == TransactionType::Expense {
            *by_category.entry(t.category).or_default() += t.amount.abs();
        }
    }

    let mut spending: Vec<CategorySpending> = by_category
        .into_iter()
        .map(|(category, total)| CategorySpending {
            category,
            spending: round_cents(total),
        })
        .collect();

    spending.sort_by(|a, b| {
        b.spending
            .partial_cmp(&a.spending)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    spending
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::NaiveDate;

    fn tx(description: &str, amount: f64, category: Category) -> CategorizedTransaction {
        let transaction_type = if amount < 0.0 {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };
        CategorizedTransaction::from_transaction(
            Transaction {
                id: uuid::Uuid::new_v4().to_string(),
                date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
                description: description.into(),
                amount,
                transaction_type,
            },
            category,
        )
    }

    #[test]
    fn test_summary_income_minus_expenses_is_net() {
        let txs = vec![
            tx("Salary Deposit", 5000.0, Category::Income),
            tx("Trader Joe's", -120.50, Category::Groceries),
            tx("PG&E Bill", -85.70, Category::Utilities),
        ];
        let summary = summarize(&txs);
        assert_eq!(summary.income, 5000.0);
        assert_eq!(summary.expenses, 206.20);
        assert_eq!(summary.net, 4793.80);
    }

    #[test]
    fn test_summary_empty_list() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_category_spending_aggregation_and_order() {
        let txs = vec![
            tx("Trader Joe's", -100.0, Category::Groceries),
            tx("Starbucks", -50.0, Category::Food),
            tx("Safeway", -25.0, Category::Groceries),
        ];
        let spending = category_spending(&txs);
        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].category, Category::Groceries);
        assert_eq!(spending[0].spending, 125.0);
        assert_eq!(spending[1].category, Category::Food);
        assert_eq!(spending[1].spending, 50.0);
    }

    #[test]
    fn test_category_spending_ignores_income() {
        let txs = vec![
            tx("Salary Deposit", 5000.0, Category::Income),
            tx("Zara", -150.0, Category::Shopping),
        ];
        let spending = category_spending(&txs);
        assert_eq!(spending.len(), 1);
        assert_eq!(spending[0].category, Category::Shopping);
    }

    #[test]
    fn test_category_spending_tie_breaks_by_name() {
        let txs = vec![
            tx("Zara", -50.0, Category::Shopping),
            tx("Starbucks", -50.0, Category::Food),
        ];
        let spending = category_spending(&txs);
        assert_eq!(spending[0].category, Category::Food);
        assert_eq!(spending[1].category, Category::Shopping);
    }
}
