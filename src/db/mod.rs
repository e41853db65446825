//! Storage module
//!
//! Key/value providers, with SQLite connection handling and migrations.

pub mod connection;
pub mod kv;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
pub use kv::{KeyValueStore, MemoryStore};
