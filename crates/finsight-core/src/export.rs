//! JSON export/import for the transaction list
//!
//! Export writes the current in-memory list as pretty JSON. Import parses a
//! user-supplied file into the typed model, so malformed fields are rejected
//! up front instead of propagating into the aggregation logic; on failure
//! the caller keeps its existing state.

use crate::error::{Error, Result};
use crate::models::CategorizedTransaction;

/// Serialize the transaction list for download
pub fn export_transactions(transactions: &[CategorizedTransaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Parse a previously exported JSON file
///
/// Validates structurally against the `CategorizedTransaction` shape: bad
/// dates, unknown categories, and missing fields all fail the import.
pub fn import_transactions(json: &str) -> Result<Vec<CategorizedTransaction>> {
    serde_json::from_str(json)
        .map_err(|e| Error::Import(format!("the file is not a valid transaction export: {}", e)))
}
