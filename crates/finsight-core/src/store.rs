//! In-memory transaction store
//!
//! All transaction state lives in one owned store per server process, the
//! way the original kept it in a single piece of session state. Mutation
//! goes through explicit entry points only: replace-all, patch-one-category,
//! clear.

use std::sync::RwLock;

use crate::models::{Category, CategorizedTransaction};

/// The single owned mutable store for the current session's transactions
#[derive(Default)]
pub struct TransactionStore {
    transactions: RwLock<Vec<CategorizedTransaction>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection (successful upload, import, sample load)
    pub fn replace_all(&self, transactions: Vec<CategorizedTransaction>) {
        let mut guard = self.transactions.write().expect("store lock poisoned");
        *guard = transactions;
    }

    /// Override one transaction's category; returns the updated transaction,
    /// or None if the id is unknown
    pub fn set_category(&self, id: &str, category: Category) -> Option<CategorizedTransaction> {
        let mut guard = self.transactions.write().expect("store lock poisoned");
        let tx = guard.iter_mut().find(|t| t.id == id)?;
        tx.category = category;
        Some(tx.clone())
    }

    /// Drop all transactions
    pub fn clear(&self) {
        let mut guard = self.transactions.write().expect("store lock poisoned");
        guard.clear();
    }

    /// Copy of the current collection, in stored order
    pub fn snapshot(&self) -> Vec<CategorizedTransaction> {
        self.transactions
            .read()
            .expect("store lock poisoned")
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions
            .read()
            .expect("store lock poisoned")
            .is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.read().expect("store lock poisoned").len()
    }
}
