//! Ledger MCP Tools
//!
//! Tools for logging meals, water, sleep and weight against the current day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::KeyValueStore;
use crate::ledger::{Clock, DailyLedger, GoalProgress, Suggestion};
use crate::models::{Goals, HistoryEntry, Meal, MealInput, Totals};
use crate::nutrition::decimal;

/// Days shown by default in history views
pub const DEFAULT_HISTORY_DAYS: usize = 7;

/// Full view of the current day
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    pub totals: Totals,
    pub water_ml: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub sleep_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub weight_kg: Option<Decimal>,
    pub goals: Goals,
    pub quote_of_day: Option<String>,
    pub progress: GoalProgress,
}

/// Response for add_meal
#[derive(Debug, Serialize)]
pub struct AddMealResponse {
    pub meal: Meal,
    pub totals: Totals,
}

/// Response for delete_meal
#[derive(Debug, Serialize)]
pub struct DeleteMealResponse {
    pub id: i64,
    pub deleted: bool,
    pub totals: Totals,
}

/// Response for water updates
#[derive(Debug, Serialize)]
pub struct WaterResponse {
    pub water_ml: u32,
    pub goal_ml: Option<u32>,
}

/// Response for set_sleep
#[derive(Debug, Serialize)]
pub struct SleepResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub sleep_hours: Decimal,
}

/// Response for set_weight
#[derive(Debug, Serialize)]
pub struct WeightResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_kg: Decimal,
}

/// Response for set_goals and get_goal_progress
#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub goals: Goals,
    pub totals: Totals,
    pub progress: GoalProgress,
}

/// Response for get_quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub date: NaiveDate,
    pub quote: String,
}

/// Response for get_suggestions
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub date: NaiveDate,
    pub suggestions: Vec<Suggestion>,
}

/// Response for get_history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub total_days: usize,
    pub protein_streak: usize,
}

/// Optional goal edits; unset fields keep their current value
#[derive(Debug, Default)]
pub struct GoalsUpdate {
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub calories: Option<f64>,
    pub water: Option<u32>,
}

// ============================================================================
// Day Tools
// ============================================================================

/// Snapshot of the current day
pub fn get_today<S: KeyValueStore, C: Clock>(ledger: &DailyLedger<S, C>) -> TodayResponse {
    let record = ledger.record();
    TodayResponse {
        date: record.date,
        meals: record.meals.clone(),
        totals: record.totals,
        water_ml: record.water_ml,
        sleep_hours: record.sleep_hours,
        weight_kg: record.weight,
        goals: record.goals.clone(),
        quote_of_day: record.quote_of_day.clone(),
        progress: ledger.goal_progress(),
    }
}

// ============================================================================
// Meal Tools
// ============================================================================

/// Log a meal; nutrient values are for the whole entry
#[allow(clippy::too_many_arguments)]
pub fn add_meal<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    name: String,
    quantity: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    calories: f64,
) -> Result<AddMealResponse, String> {
    let input = MealInput {
        name,
        quantity: decimal::from_f64(quantity),
        protein: decimal::from_f64(protein),
        carbs: decimal::from_f64(carbs),
        fat: decimal::from_f64(fat),
        calories: decimal::from_f64(calories),
    };

    let meal = ledger.add_meal(input).map_err(|e| e.to_string())?;
    Ok(AddMealResponse {
        meal,
        totals: ledger.totals(),
    })
}

pub fn delete_meal<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    id: i64,
) -> DeleteMealResponse {
    let deleted = ledger.record().meals.iter().any(|m| m.id == id);
    let totals = ledger.delete_meal(id);
    DeleteMealResponse { id, deleted, totals }
}

// ============================================================================
// Water / Sleep / Weight Tools
// ============================================================================

/// Add (or with a negative amount, remove) water
pub fn add_water<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    amount_ml: i64,
) -> WaterResponse {
    let water_ml = ledger.add_water(amount_ml);
    WaterResponse {
        water_ml,
        goal_ml: ledger.record().goals.water,
    }
}

pub fn set_water<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    water_ml: u32,
) -> WaterResponse {
    let water_ml = ledger.set_water(water_ml);
    WaterResponse {
        water_ml,
        goal_ml: ledger.record().goals.water,
    }
}

pub fn set_sleep<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    hours: f64,
) -> Result<SleepResponse, String> {
    let sleep_hours = ledger
        .set_sleep(decimal::from_f64(hours))
        .map_err(|e| e.to_string())?;
    Ok(SleepResponse { sleep_hours })
}

pub fn set_weight<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    weight: &str,
) -> Result<WeightResponse, String> {
    let weight_kg = ledger.set_weight(weight).map_err(|e| e.to_string())?;
    Ok(WeightResponse { weight_kg })
}

// ============================================================================
// Goals / Quote / History Tools
// ============================================================================

pub fn set_goals<S: KeyValueStore, C: Clock>(
    ledger: &mut DailyLedger<S, C>,
    update: GoalsUpdate,
) -> Result<GoalsResponse, String> {
    let current = ledger.record().goals.clone();
    let goals = Goals {
        protein: update.protein.map(decimal::from_f64).unwrap_or(current.protein),
        carbs: update.carbs.map(decimal::from_f64).unwrap_or(current.carbs),
        fat: update.fat.map(decimal::from_f64).unwrap_or(current.fat),
        calories: update.calories.map(decimal::from_f64).unwrap_or(current.calories),
        water: update.water.or(current.water),
    };

    ledger.set_goals(goals).map_err(|e| e.to_string())?;
    Ok(get_goal_progress(ledger))
}

pub fn get_goal_progress<S: KeyValueStore, C: Clock>(ledger: &DailyLedger<S, C>) -> GoalsResponse {
    GoalsResponse {
        goals: ledger.record().goals.clone(),
        totals: ledger.totals(),
        progress: ledger.goal_progress(),
    }
}

pub fn get_quote<S: KeyValueStore, C: Clock>(ledger: &mut DailyLedger<S, C>) -> QuoteResponse {
    let quote = ledger.quote_of_day();
    QuoteResponse {
        date: ledger.record().date,
        quote,
    }
}

pub fn get_suggestions<S: KeyValueStore, C: Clock>(ledger: &DailyLedger<S, C>) -> SuggestionsResponse {
    SuggestionsResponse {
        date: ledger.record().date,
        suggestions: ledger.suggestions(),
    }
}

/// Recent archived days, oldest first
pub fn get_history<S: KeyValueStore, C: Clock>(
    ledger: &DailyLedger<S, C>,
    days: Option<usize>,
) -> HistoryResponse {
    HistoryResponse {
        entries: ledger.recent_history(days.unwrap_or(DEFAULT_HISTORY_DAYS)),
        total_days: ledger.history().len(),
        protein_streak: ledger.protein_streak(),
    }
}
