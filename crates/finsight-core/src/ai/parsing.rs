//! JSON parsing helpers for AI backend responses
//!
//! These functions extract JSON from AI model responses, which often include
//! extra text before/after the JSON payload.

use crate::error::{Error, Result};

use super::types::{CategorizationResponse, CategorizedExpense, ExtractionResponse, RawTransaction};

/// Parse extracted transactions from an AI response
pub fn parse_extraction_response(response: &str) -> Result<Vec<RawTransaction>> {
    let envelope: ExtractionResponse = parse_json_object(response)?;
    Ok(envelope.transactions)
}

/// Parse categorized expenses from an AI response
pub fn parse_categorization_response(response: &str) -> Result<Vec<CategorizedExpense>> {
    let envelope: CategorizationResponse = parse_json_object(response)?;
    Ok(envelope.categorized_transactions)
}

/// Dig a JSON object out of a free-text model response
fn parse_json_object<T: serde::de::DeserializeOwned>(response: &str) -> Result<T> {
    let response = response.trim();

    // Look for JSON object
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                // Truncate long responses for the error message
                let truncated = if json_str.len() > 200 {
                    format!("{}...", &json_str[..200])
                } else {
                    json_str.to_string()
                };
                Error::InvalidData(format!("Invalid JSON from AI: {} | Raw: {}", e, truncated))
            })
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            if response.len() > 200 {
                format!("{}...", &response[..200])
            } else {
                response.to_string()
            }
        ))),
    }
}
