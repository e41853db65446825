//! FitTrack Library
//!
//! Daily nutrition ledger: meal logging, totals, goals, and day rollover into
//! a persistent history log.

pub mod build_info;
pub mod db;
pub mod ledger;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
