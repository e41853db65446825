//! Day rollover
//!
//! When the stored day is no longer today, it is summarized into the history
//! log and replaced by a fresh day that keeps the previous goals.

use tracing::info;

use super::clock::Clock;
use super::store::LedgerStore;
use crate::db::KeyValueStore;
use crate::models::{DailyRecord, HistoryEntry};
use crate::nutrition::aggregate::sum_nutrients;

/// Result of the start-of-session rollover check
///
/// Both variants carry the record the caller should continue with.
#[derive(Debug, Clone, PartialEq)]
pub enum RolloverOutcome {
    /// Stored day is today; returned unchanged
    Current(DailyRecord),
    /// Stored day expired; it was archived and a fresh day saved
    RolledOver {
        archived: HistoryEntry,
        record: DailyRecord,
    },
}

impl RolloverOutcome {
    pub fn record(&self) -> &DailyRecord {
        match self {
            RolloverOutcome::Current(record) => record,
            RolloverOutcome::RolledOver { record, .. } => record,
        }
    }

    pub fn into_record(self) -> DailyRecord {
        match self {
            RolloverOutcome::Current(record) => record,
            RolloverOutcome::RolledOver { record, .. } => record,
        }
    }

    pub fn archived(&self) -> Option<&HistoryEntry> {
        match self {
            RolloverOutcome::Current(_) => None,
            RolloverOutcome::RolledOver { archived, .. } => Some(archived),
        }
    }

    pub fn rolled_over(&self) -> bool {
        matches!(self, RolloverOutcome::RolledOver { .. })
    }
}

/// Summarize a finished day
///
/// Protein is archived as the exact sum, and the goal check uses that same
/// exact value. Calories are archived rounded to a whole number.
pub fn summarize_day(record: &DailyRecord) -> HistoryEntry {
    let sums = sum_nutrients(&record.meals);
    HistoryEntry {
        date: record.date,
        total_protein: sums.protein,
        total_calories: sums.rounded().calories,
        met_protein_goal: sums.protein >= record.goals.protein,
    }
}

impl<S: KeyValueStore, C: Clock> LedgerStore<S, C> {
    /// Archive the stored day if it is not today
    pub fn reset_if_new_day(&self) -> RolloverOutcome {
        let daily = self.load_daily_data();
        let today = self.today();

        if daily.date == today {
            return RolloverOutcome::Current(daily);
        }

        let archived = summarize_day(&daily);
        self.append_history(archived.clone());

        let record = DailyRecord::new(today, daily.goals);
        self.save_daily_data(&record);

        info!(
            archived_date = %archived.date,
            date = %record.date,
            total_protein = %archived.total_protein,
            met_protein_goal = archived.met_protein_goal,
            "Rolled over to new day"
        );

        RolloverOutcome::RolledOver { archived, record }
    }
}
