//! Domain models for FinSight

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction direction
///
/// The extraction model is instructed to keep the amount sign consistent with
/// the type (negative = expense, positive = income), but that correspondence
/// is a prompt-level convention, not something enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed set of spending categories
///
/// `Income` is reserved for income transactions and never offered to the
/// categorization model; everything the model invents outside this set folds
/// into `Others`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Utilities,
    Entertainment,
    Travel,
    Food,
    Shopping,
    Bills,
    Income,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Income => "Income",
            Self::Others => "Others",
        }
    }

    /// All categories, in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Groceries,
            Self::Utilities,
            Self::Entertainment,
            Self::Travel,
            Self::Food,
            Self::Shopping,
            Self::Bills,
            Self::Income,
            Self::Others,
        ]
    }

    /// Categories offered to the expense categorization model (everything
    /// except Income)
    pub fn expense_categories() -> &'static [Category] {
        &[
            Self::Groceries,
            Self::Utilities,
            Self::Entertainment,
            Self::Travel,
            Self::Food,
            Self::Shopping,
            Self::Bills,
            Self::Others,
        ]
    }

    /// Parse a model-produced label, folding anything unrecognized into
    /// `Others`
    pub fn from_label(label: &str) -> Category {
        label.trim().parse().unwrap_or(Self::Others)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groceries" => Ok(Self::Groceries),
            "utilities" => Ok(Self::Utilities),
            "entertainment" => Ok(Self::Entertainment),
            "travel" => Ok(Self::Travel),
            "food" => Ok(Self::Food),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "income" => Ok(Self::Income),
            "others" | "other" => Ok(Self::Others),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated monetary movement from a bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Locally generated UUID (the extraction model output carries no ids)
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Signed amount: negative for expenses, positive for income
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// A transaction with its assigned spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
}

impl CategorizedTransaction {
    pub fn from_transaction(tx: Transaction, category: Category) -> Self {
        Self {
            id: tx.id,
            date: tx.date,
            description: tx.description,
            amount: tx.amount,
            transaction_type: tx.transaction_type,
            category,
        }
    }
}

/// Aggregate income/expense/net totals over a transaction collection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Summed absolute expense amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: Category,
    pub spending: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label_known() {
        assert_eq!(Category::from_label("Groceries"), Category::Groceries);
        assert_eq!(Category::from_label(" bills "), Category::Bills);
        assert_eq!(Category::from_label("FOOD"), Category::Food);
    }

    #[test]
    fn test_category_from_label_unknown_folds_to_others() {
        assert_eq!(Category::from_label("Cryptocurrency"), Category::Others);
        assert_eq!(Category::from_label(""), Category::Others);
    }

    #[test]
    fn test_expense_categories_exclude_income() {
        assert!(!Category::expense_categories().contains(&Category::Income));
        assert_eq!(Category::expense_categories().len(), 8);
    }

    #[test]
    fn test_transaction_type_roundtrip() {
        let json = serde_json::to_string(&TransactionType::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
        let back: TransactionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TransactionType::Expense);
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            id: "abc".into(),
            date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            description: "Salary Deposit".into(),
            amount: 5000.0,
            transaction_type: TransactionType::Income,
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["date"], "2024-07-15");
    }
}
