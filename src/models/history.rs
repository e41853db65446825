//! History entry model
//!
//! Immutable summary of one archived day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Archived day summary, appended at rollover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[serde(default, with = "lenient::number")]
    pub total_protein: Decimal,
    #[serde(default, deserialize_with = "lenient::integer::deserialize")]
    pub total_calories: i64,
    #[serde(default)]
    pub met_protein_goal: bool,
}

/// Count consecutive most-recent entries that met the protein goal
pub fn protein_streak(history: &[HistoryEntry]) -> usize {
    history
        .iter()
        .rev()
        .take_while(|entry| entry.met_protein_goal)
        .count()
}
