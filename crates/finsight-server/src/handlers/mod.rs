//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod dashboard;
pub mod statements;
pub mod transactions;

// Re-export all handlers for use in router
pub use dashboard::*;
pub use statements::*;
pub use transactions::*;
