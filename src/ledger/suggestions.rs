//! Nutrition suggestions
//!
//! Calories and protein under 90% of the day's goal are flagged with the
//! remaining deficit.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Goals, Nutrients};
use crate::nutrition::decimal;

/// Share of a goal (in percent) below which a nutrient is flagged
pub const SUGGESTION_THRESHOLD_PERCENT: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Calories,
    Protein,
}

/// One flagged nutrient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
    /// Goal minus consumed, rounded to a whole unit
    pub deficit: i64,
}

fn below_threshold(consumed: Decimal, goal: Decimal) -> bool {
    decimal::mul(consumed, 100) < decimal::mul(goal, SUGGESTION_THRESHOLD_PERCENT)
}

fn deficit(consumed: Decimal, goal: Decimal) -> i64 {
    decimal::round(decimal::sub(goal, consumed), 0)
        .to_i64()
        .unwrap_or(0)
}

/// Suggestions for exact consumed sums against the goals
pub fn suggestions(consumed: &Nutrients, goals: &Goals) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if below_threshold(consumed.calories, goals.calories) {
        let deficit = deficit(consumed.calories, goals.calories);
        out.push(Suggestion {
            kind: SuggestionKind::Calories,
            message: format!("You're {} kcal short of your calorie goal today", deficit),
            deficit,
        });
    }

    if below_threshold(consumed.protein, goals.protein) {
        let deficit = deficit(consumed.protein, goals.protein);
        out.push(Suggestion {
            kind: SuggestionKind::Protein,
            message: format!("You're {}g short on protein today", deficit),
            deficit,
        });
    }

    out
}
