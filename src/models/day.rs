//! Daily record model
//!
//! The single mutable "today" ledger: meals, water, sleep, weight and goals,
//! plus cached totals derived from the meals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{lenient, Goals, Meal, Totals};
use crate::nutrition::aggregate::recalc_totals;

/// Sleep assumed for a fresh day
pub const DEFAULT_SLEEP_HOURS: i64 = 7;

fn default_sleep_hours() -> Decimal {
    Decimal::from(DEFAULT_SLEEP_HOURS)
}

/// The current day's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,  // ISO date: "2025-01-09"
    #[serde(default, deserialize_with = "lenient::list::deserialize")]
    pub meals: Vec<Meal>,
    #[serde(default, deserialize_with = "lenient::whole::deserialize")]
    pub water_ml: u32,
    #[serde(default = "default_sleep_hours", with = "lenient::number")]
    pub sleep_hours: Decimal,
    /// Body weight in kilograms
    #[serde(default, with = "lenient::optional_number")]
    pub weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::or_default::deserialize")]
    pub goals: Goals,
    #[serde(default, deserialize_with = "lenient::optional_text::deserialize")]
    pub quote_of_day: Option<String>,
    /// Cached totals over `meals`
    #[serde(flatten)]
    pub totals: Totals,
}

impl DailyRecord {
    /// A fresh day with no meals
    pub fn new(date: NaiveDate, goals: Goals) -> Self {
        Self {
            date,
            meals: Vec::new(),
            water_ml: 0,
            sleep_hours: default_sleep_hours(),
            weight: None,
            goals,
            quote_of_day: None,
            totals: Totals::zero(),
        }
    }

    /// Parse a persisted record, filling defaults and re-deriving totals
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        let mut record: Self = serde_json::from_str(raw)?;
        record.goals = record.goals.sanitized();
        record.quote_of_day = record.quote_of_day.filter(|q| !q.trim().is_empty());
        if record.sleep_hours < Decimal::ZERO {
            record.sleep_hours = default_sleep_hours();
        }
        record.recalculate();
        Ok(record)
    }

    /// Refresh cached totals from the meal list
    pub fn recalculate(&mut self) -> Totals {
        self.totals = recalc_totals(&self.meals);
        self.totals
    }
}
