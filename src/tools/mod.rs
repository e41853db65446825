//! FitTrack Tools module
//!
//! MCP tool implementations for the daily ledger.

pub mod ledger;
pub mod status;
