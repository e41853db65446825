//! FitTrack Status Tool
//!
//! Provides runtime status information about the FitTrack service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Ledger usage instructions for AI assistants
pub const LEDGER_INSTRUCTIONS: &str = r#"
# FitTrack Daily Ledger Instructions

FitTrack keeps one ledger for the current day. Meals, water, sleep and weight
are logged against it. When a new day starts, the previous day is summarized
into the history log and a fresh ledger begins with the same goals.

## Logging Meals

**Tool:** `add_meal`
- `name` (required): what was eaten
- `quantity` (default 1): servings, must be greater than zero
- `protein`, `carbs`, `fat`: grams for the whole entry, zero or more
- `calories`: kcal for the whole entry, must be greater than zero

Nutrient values are NOT multiplied by quantity. Enter the totals for what was
actually eaten. Rejected entries leave the ledger unchanged.

**Tool:** `delete_meal` with the meal `id` shown by `get_today`.

## Water, Sleep, Weight

- `add_water` with `amount_ml` (negative removes; the total never drops below 0)
- `set_water` to overwrite the day's total
- `set_sleep` with `hours` between 0 and 24
- `set_weight` with text like `"75kg"` or `"75000g"`; stored in kilograms,
  accepted range 20-300 kg

## Goals

`set_goals` changes any of protein, carbs, fat, calories (and optionally a
water goal in ml). Every value must be greater than zero. Goals carry over to
the next day. `get_goal_progress` shows consumption as a percentage of each goal.
`get_suggestions` lists calories or protein still under 90% of the goal, with
the deficit to make up (e.g. "You're 20g short on protein today").

## Review

- `get_today`: meals, totals, goals and progress for the current day
- `get_history`: archived days (default last 7) plus the current protein streak
- `get_quote`: the motivation line for today; stays the same all day

## Rounding

Totals are summed exactly, then rounded for display: calories to a whole
number, protein/carbs/fat to one decimal place. Halves round away from zero.
"#;

/// Runtime status of the FitTrack service
#[derive(Debug, Clone, Serialize)]
pub struct FittrackStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> FittrackStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FittrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/fittrack.db"));
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_instructions_name_every_ledger_tool() {
        for tool in ["add_meal", "delete_meal", "add_water", "set_water", "set_sleep",
                     "set_weight", "set_goals", "get_today", "get_history", "get_quote",
                     "get_goal_progress", "get_suggestions"] {
            assert!(LEDGER_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
