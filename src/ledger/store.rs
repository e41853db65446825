//! Daily ledger store
//!
//! Owns both persisted documents: the current day under `current-day` and the
//! history log under `history-log`. Storage failures never reach the caller:
//! reads fall back to defaults and writes are dropped, both with a warning.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::clock::Clock;
use crate::db::KeyValueStore;
use crate::models::{DailyRecord, Goals, HistoryEntry};

/// Storage key of the current day record
pub const DAILY_KEY: &str = "current-day";
/// Storage key of the history log
pub const HISTORY_KEY: &str = "history-log";

/// Best-effort persistence for the daily record and history log
pub struct LedgerStore<S, C> {
    storage: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> LedgerStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Load the current day, creating and persisting a fresh one if needed
    pub fn load_daily_data(&self) -> DailyRecord {
        if let Some(record) = self.read_daily() {
            return record;
        }

        let record = DailyRecord::new(self.today(), Goals::default());
        debug!(date = %record.date, "Created daily record");
        self.save_daily_data(&record);
        record
    }

    fn read_daily(&self) -> Option<DailyRecord> {
        let raw = self.read_key(DAILY_KEY)?;
        match DailyRecord::parse(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = DAILY_KEY, error = %e, "Discarding corrupt daily record");
                None
            }
        }
    }

    /// Overwrite the persisted current day
    pub fn save_daily_data(&self, record: &DailyRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.write_key(DAILY_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize daily record"),
        }
    }

    /// Full history log, oldest first
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        let Some(raw) = self.read_key(HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                warn!(key = HISTORY_KEY, error = %e, "Discarding corrupt history log");
                Vec::new()
            }
        }
    }

    /// Append one entry to the end of the history log
    pub fn append_history(&self, entry: HistoryEntry) {
        // An unreadable log is left alone rather than replaced by a one-entry log
        if let Err(e) = self.storage.get(HISTORY_KEY) {
            warn!(key = HISTORY_KEY, error = %e, "History unavailable, entry dropped");
            return;
        }

        let mut history = self.load_history();
        history.push(entry);

        match serde_json::to_string(&history) {
            Ok(json) => self.write_key(HISTORY_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize history log"),
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Storage read failed");
                None
            }
        }
    }

    fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Storage write failed");
        }
    }
}
