//! Statement categorization pipeline
//!
//! Linear orchestration of one statement submission:
//!
//! ```text
//! extract text -> extract transactions -> categorize expenses -> merge
//! ```
//!
//! Any stage failure aborts the whole submission with a single typed error.
//! There is no retry and no partial success: prior work for the submission
//! is discarded and the caller reports one message to the user.

use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::{AIBackend, CategorizedExpense, ExpenseInput};
use crate::error::{Error, Result};
use crate::extract::extract_statement_text;
use crate::models::{Category, CategorizedTransaction, Transaction, TransactionType};

/// The categorization pipeline, generic over the injected AI backend
///
/// Keeping the backend behind `AIBackend` decouples the orchestration logic
/// from the model's behavior; tests run the full pipeline against the
/// deterministic mock.
pub struct Pipeline<B: AIBackend> {
    backend: B,
}

impl<B: AIBackend> Pipeline<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the full pipeline on an uploaded document (PDF or plain text)
    pub async fn process_document(&self, bytes: &[u8]) -> Result<Vec<CategorizedTransaction>> {
        let text = extract_statement_text(bytes)?;
        self.process_text(&text).await
    }

    /// Run the pipeline on already-extracted statement text
    ///
    /// Zero extracted transactions is a hard failure: an empty statement is
    /// assumed to be an extraction failure, not reality.
    pub async fn process_text(&self, statement_text: &str) -> Result<Vec<CategorizedTransaction>> {
        info!(model = %self.backend.model(), "Extracting transactions from statement text");
        let raw = self.backend.extract_transactions(statement_text).await?;

        if raw.is_empty() {
            return Err(Error::NoTransactions);
        }
        debug!(count = raw.len(), "Model extracted transactions");

        // The model output carries no ids; assign them locally
        let transactions: Vec<Transaction> = raw
            .into_iter()
            .map(|r| Transaction {
                id: Uuid::new_v4().to_string(),
                date: r.date,
                description: r.description,
                amount: r.amount,
                transaction_type: r.transaction_type,
            })
            .collect();

        self.categorize(transactions).await
    }

    /// Categorize an existing transaction list (sample-data path)
    ///
    /// Income transactions bypass the model call entirely and are assigned
    /// `Category::Income` unconditionally. Expenses go to the categorization
    /// model in one batch; the merged result is sorted by date descending
    /// (stable, so ties keep their prior order).
    pub async fn categorize(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<CategorizedTransaction>> {
        let (expenses, income): (Vec<_>, Vec<_>) = transactions
            .into_iter()
            .partition(|t| t.transaction_type == TransactionType::Expense);

        let categorized_expenses = if expenses.is_empty() {
            Vec::new()
        } else {
            let inputs: Vec<ExpenseInput> = expenses
                .iter()
                .map(|t| ExpenseInput {
                    date: t.date,
                    description: t.description.clone(),
                    amount: t.amount,
                })
                .collect();

            info!(count = inputs.len(), "Categorizing expenses");
            let outputs = self
                .backend
                .categorize_expenses(&inputs)
                .await
                .map_err(|e| Error::Categorization(e.to_string()))?;

            reconcile(expenses, outputs)
        };

        let mut merged: Vec<CategorizedTransaction> = income
            .into_iter()
            .map(|t| CategorizedTransaction::from_transaction(t, Category::Income))
            .chain(categorized_expenses)
            .collect();

        merged.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(merged)
    }
}

/// Match model output back to the original expenses
///
/// Primary key is (description, amount in cents); positional order is the
/// fallback when the model reworded a description. Duplicate
/// (description, amount) pairs in one batch are inherently ambiguous and may
/// be matched to either occurrence. Expenses the model dropped fold into
/// `Others` rather than failing the batch.
fn reconcile(
    expenses: Vec<Transaction>,
    outputs: Vec<CategorizedExpense>,
) -> Vec<CategorizedTransaction> {
    let mut by_key: HashMap<(String, i64), Vec<usize>> = HashMap::new();
    for (idx, expense) in expenses.iter().enumerate() {
        by_key
            .entry(expense_key(&expense.description, expense.amount))
            .or_default()
            .push(idx);
    }
    // Pop from the front so duplicates resolve in statement order
    for indices in by_key.values_mut() {
        indices.reverse();
    }

    let mut categories: Vec<Option<Category>> = vec![None; expenses.len()];

    for (position, output) in outputs.iter().enumerate() {
        let category = Category::from_label(&output.category);

        let matched = by_key
            .get_mut(&expense_key(&output.description, output.amount))
            .and_then(|indices| {
                while let Some(idx) = indices.pop() {
                    if categories[idx].is_none() {
                        return Some(idx);
                    }
                }
                None
            });

        match matched {
            Some(idx) => categories[idx] = Some(category),
            None => {
                // Positional fallback for reworded descriptions
                if position < categories.len() && categories[position].is_none() {
                    debug!(
                        description = %output.description,
                        position,
                        "Categorization output matched positionally"
                    );
                    categories[position] = Some(category);
                }
            }
        }
    }

    expenses
        .into_iter()
        .zip(categories)
        .map(|(expense, category)| {
            CategorizedTransaction::from_transaction(
                expense,
                category.unwrap_or(Category::Others),
            )
        })
        .collect()
}

/// Matching key: description plus amount in cents (avoids f64 equality)
fn expense_key(description: &str, amount: f64) -> (String, i64) {
    (
        description.trim().to_lowercase(),
        (amount * 100.0).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockBackend, RawTransaction};
    use crate::data::sample_transactions;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn expense(date_str: &str, description: &str, amount: f64) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            date: date(date_str),
            description: description.into(),
            amount,
            transaction_type: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn test_process_text_assigns_unique_ids() {
        let pipeline = Pipeline::new(MockBackend::new());
        let result = pipeline
            .process_text("2024-07-15|Salary Deposit|5000\n2024-07-20|Trader Joe's|-120.50")
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_ne!(result[0].id, result[1].id);
        assert!(!result[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_zero_extracted_transactions_is_error() {
        let pipeline = Pipeline::new(MockBackend::new());
        let err = pipeline
            .process_text("no transactions in this text")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoTransactions));
    }

    #[tokio::test]
    async fn test_income_bypasses_model_and_gets_income_category() {
        let pipeline = Pipeline::new(MockBackend::new());
        let result = pipeline
            .categorize(sample_transactions())
            .await
            .unwrap();

        for tx in &result {
            if tx.transaction_type == TransactionType::Income {
                assert_eq!(tx.category, Category::Income);
            }
        }
    }

    #[tokio::test]
    async fn test_merge_sorted_by_date_descending() {
        let pipeline = Pipeline::new(MockBackend::new());
        let result = pipeline.categorize(sample_transactions()).await.unwrap();

        for pair in result.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        assert_eq!(result[0].description, "Apple Store");
    }

    #[tokio::test]
    async fn test_income_only_list_skips_categorization_call() {
        // A backend that panics on categorize proves the call is skipped
        struct NoCategorize;

        #[async_trait]
        impl AIBackend for NoCategorize {
            async fn extract_transactions(&self, _: &str) -> Result<Vec<RawTransaction>> {
                unreachable!()
            }
            async fn categorize_expenses(
                &self,
                _: &[ExpenseInput],
            ) -> Result<Vec<CategorizedExpense>> {
                panic!("categorize_expenses must not be called for income-only input");
            }
            async fn health_check(&self) -> bool {
                true
            }
            fn model(&self) -> &str {
                "none"
            }
            fn host(&self) -> &str {
                "none"
            }
        }

        let pipeline = Pipeline::new(NoCategorize);
        let income = vec![Transaction {
            id: "a".into(),
            date: date("2024-07-15"),
            description: "Salary Deposit".into(),
            amount: 5000.0,
            transaction_type: TransactionType::Income,
        }];
        let result = pipeline.categorize(income).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, Category::Income);
    }

    #[tokio::test]
    async fn test_categorization_failure_aborts_pipeline() {
        struct FailingBackend;

        #[async_trait]
        impl AIBackend for FailingBackend {
            async fn extract_transactions(&self, _: &str) -> Result<Vec<RawTransaction>> {
                unreachable!()
            }
            async fn categorize_expenses(
                &self,
                _: &[ExpenseInput],
            ) -> Result<Vec<CategorizedExpense>> {
                Err(Error::InvalidData("model returned garbage".into()))
            }
            async fn health_check(&self) -> bool {
                false
            }
            fn model(&self) -> &str {
                "failing"
            }
            fn host(&self) -> &str {
                "failing"
            }
        }

        let pipeline = Pipeline::new(FailingBackend);
        let err = pipeline
            .categorize(vec![expense("2024-08-02", "Zara", -150.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Categorization(_)));
    }

    #[tokio::test]
    async fn test_idempotent_categorization_with_deterministic_backend() {
        let pipeline = Pipeline::new(MockBackend::new());
        let first = pipeline.categorize(sample_transactions()).await.unwrap();
        let second = pipeline.categorize(sample_transactions()).await.unwrap();

        // Ids differ per run; category assignment per (description, amount)
        // must not
        let key = |t: &CategorizedTransaction| (t.description.clone(), expense_key(&t.description, t.amount).1);
        let mut first_map: Vec<_> = first.iter().map(|t| (key(t), t.category)).collect();
        let mut second_map: Vec<_> = second.iter().map(|t| (key(t), t.category)).collect();
        first_map.sort_by(|a, b| a.0.cmp(&b.0));
        second_map.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(first_map, second_map);
    }

    #[test]
    fn test_reconcile_by_description_and_amount_out_of_order() {
        let expenses = vec![
            expense("2024-07-20", "Trader Joe's", -120.5),
            expense("2024-07-21", "Netflix Subscription", -15.99),
        ];
        // Model returned the rows swapped
        let outputs = vec![
            CategorizedExpense {
                date: None,
                description: "Netflix Subscription".into(),
                amount: -15.99,
                category: "Entertainment".into(),
            },
            CategorizedExpense {
                date: None,
                description: "Trader Joe's".into(),
                amount: -120.5,
                category: "Groceries".into(),
            },
        ];
        let result = reconcile(expenses, outputs);
        assert_eq!(result[0].category, Category::Groceries);
        assert_eq!(result[1].category, Category::Entertainment);
    }

    #[test]
    fn test_reconcile_positional_fallback_for_reworded_description() {
        let expenses = vec![expense("2024-07-22", "UNITED AIR 0123456", -450.0)];
        let outputs = vec![CategorizedExpense {
            date: None,
            description: "United Airlines".into(),
            amount: -450.0,
            category: "Travel".into(),
        }];
        let result = reconcile(expenses, outputs);
        assert_eq!(result[0].category, Category::Travel);
    }

    #[test]
    fn test_reconcile_dropped_row_folds_to_others() {
        let expenses = vec![
            expense("2024-08-02", "Zara", -150.0),
            expense("2024-08-03", "Sweetgreen", -14.5),
        ];
        let outputs = vec![CategorizedExpense {
            date: None,
            description: "Zara".into(),
            amount: -150.0,
            category: "Shopping".into(),
        }];
        let result = reconcile(expenses, outputs);
        assert_eq!(result[0].category, Category::Shopping);
        assert_eq!(result[1].category, Category::Others);
    }

    #[test]
    fn test_reconcile_unknown_label_folds_to_others() {
        let expenses = vec![expense("2024-08-14", "Apple Store", -999.0)];
        let outputs = vec![CategorizedExpense {
            date: None,
            description: "Apple Store".into(),
            amount: -999.0,
            category: "Gadgets".into(),
        }];
        let result = reconcile(expenses, outputs);
        assert_eq!(result[0].category, Category::Others);
    }

    #[test]
    fn test_reconcile_duplicate_pairs_resolve_in_statement_order() {
        let expenses = vec![
            expense("2024-07-20", "Starbucks", -5.75),
            expense("2024-07-25", "Starbucks", -5.75),
        ];
        let outputs = vec![
            CategorizedExpense {
                date: None,
                description: "Starbucks".into(),
                amount: -5.75,
                category: "Food".into(),
            },
            CategorizedExpense {
                date: None,
                description: "Starbucks".into(),
                amount: -5.75,
                category: "Food".into(),
            },
        ];
        let result = reconcile(expenses, outputs);
        assert_eq!(result[0].category, Category::Food);
        assert_eq!(result[1].category, Category::Food);
    }
}
