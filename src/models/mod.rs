//! Data models
//!
//! Meals, goals, the daily record and archived history entries.

mod day;
mod goals;
mod history;
pub mod lenient;
mod meal;
mod nutrition;
mod validation;

pub use day::{DailyRecord, DEFAULT_SLEEP_HOURS};
pub use goals::Goals;
pub use history::{protein_streak, HistoryEntry};
pub use meal::{next_meal_id, Meal, MealInput};
pub use nutrition::{Nutrients, Totals};
pub use validation::{
    parse_weight, validate_goals, validate_meal, validate_sleep, ValidationError,
};
