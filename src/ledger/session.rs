//! Ledger session
//!
//! A `DailyLedger` is opened once per process. Opening runs the rollover
//! check; after that every mutation goes through the session, which keeps the
//! in-memory record and storage in step.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::clock::Clock;
use super::store::LedgerStore;
use super::suggestions::{suggestions, Suggestion};
use crate::db::KeyValueStore;
use crate::models::{
    next_meal_id, parse_weight, protein_streak, validate_goals, validate_sleep, DailyRecord,
    Goals, HistoryEntry, Meal, MealInput, Totals, ValidationError,
};
use crate::nutrition::aggregate::sum_nutrients;
use crate::nutrition::decimal;

/// Daily motivation lines
pub const QUOTES: [&str; 5] = [
    "Discipline beats motivation, every day.",
    "Small progress is still progress.",
    "Your future self will thank you.",
    "Make habits, not excuses.",
    "Consistency over intensity.",
];

/// Consumption as a percentage of each goal, one decimal place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    #[serde(with = "rust_decimal::serde::float")]
    pub calories: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub protein: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub carbs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fat: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub water: Option<Decimal>,
}

fn percent_of(consumed: Decimal, goal: Decimal) -> Decimal {
    decimal::round(decimal::mul(decimal::div(consumed, goal), 100), 1)
}

/// The open ledger for the current session
pub struct DailyLedger<S, C> {
    store: LedgerStore<S, C>,
    record: DailyRecord,
    archived: Option<HistoryEntry>,
}

impl<S: KeyValueStore, C: Clock> DailyLedger<S, C> {
    /// Open the session, rolling the stored day over if it has expired
    pub fn open(store: LedgerStore<S, C>) -> Self {
        let outcome = store.reset_if_new_day();
        let archived = outcome.archived().cloned();
        let record = outcome.into_record();
        debug!(date = %record.date, meals = record.meals.len(), "Opened ledger");
        Self {
            store,
            record,
            archived,
        }
    }

    pub fn record(&self) -> &DailyRecord {
        &self.record
    }

    pub fn totals(&self) -> Totals {
        self.record.totals
    }

    /// The day archived when this session opened, if any
    pub fn archived_on_open(&self) -> Option<&HistoryEntry> {
        self.archived.as_ref()
    }

    fn persist(&self) {
        self.store.save_daily_data(&self.record);
    }

    // ------------------------------------------------------------------------
    // Meals
    // ------------------------------------------------------------------------

    /// Validate and log a meal, then refresh totals
    pub fn add_meal(&mut self, input: MealInput) -> Result<Meal, ValidationError> {
        let id = next_meal_id(&self.record.meals);
        let meal = input.into_meal(id, self.store.clock().now())?;

        self.record.meals.push(meal.clone());
        self.record.recalculate();
        self.persist();

        debug!(meal_id = meal.id, name = %meal.name, "Logged meal");
        Ok(meal)
    }

    /// Remove a meal by id and return the refreshed totals
    ///
    /// Unknown ids leave the record as it is.
    pub fn delete_meal(&mut self, id: i64) -> Totals {
        let before = self.record.meals.len();
        self.record.meals.retain(|m| m.id != id);

        if self.record.meals.len() == before {
            debug!(meal_id = id, "No meal with this id");
            return self.record.totals;
        }

        let totals = self.record.recalculate();
        self.persist();
        debug!(meal_id = id, "Deleted meal");
        totals
    }

    // ------------------------------------------------------------------------
    // Water, sleep, weight
    // ------------------------------------------------------------------------

    /// Change water intake by a signed amount, never going below zero
    pub fn add_water(&mut self, delta_ml: i64) -> u32 {
        let next = i64::from(self.record.water_ml)
            .saturating_add(delta_ml)
            .clamp(0, i64::from(u32::MAX));
        self.set_water(u32::try_from(next).unwrap_or(u32::MAX))
    }

    pub fn set_water(&mut self, ml: u32) -> u32 {
        self.record.water_ml = ml;
        self.persist();
        ml
    }

    pub fn set_sleep(&mut self, hours: Decimal) -> Result<Decimal, ValidationError> {
        let hours = validate_sleep(hours)?;
        self.record.sleep_hours = hours;
        self.persist();
        Ok(hours)
    }

    /// Record body weight from input like `"75kg"`; returns kilograms
    pub fn set_weight(&mut self, input: &str) -> Result<Decimal, ValidationError> {
        let kg = parse_weight(input)?;
        self.record.weight = Some(kg);
        self.persist();
        Ok(kg)
    }

    pub fn clear_weight(&mut self) {
        self.record.weight = None;
        self.persist();
    }

    // ------------------------------------------------------------------------
    // Goals
    // ------------------------------------------------------------------------

    pub fn set_goals(&mut self, goals: Goals) -> Result<(), ValidationError> {
        validate_goals(&goals)?;
        self.record.goals = goals;
        self.persist();
        Ok(())
    }

    pub fn goal_progress(&self) -> GoalProgress {
        let goals = &self.record.goals;
        let totals = &self.record.totals;
        GoalProgress {
            calories: percent_of(Decimal::from(totals.calories), goals.calories),
            protein: percent_of(totals.protein, goals.protein),
            carbs: percent_of(totals.carbs, goals.carbs),
            fat: percent_of(totals.fat, goals.fat),
            water: goals
                .water
                .map(|goal| percent_of(Decimal::from(self.record.water_ml), Decimal::from(goal))),
        }
    }

    /// Calories and protein still short of 90% of their goals
    pub fn suggestions(&self) -> Vec<Suggestion> {
        suggestions(&sum_nutrients(&self.record.meals), &self.record.goals)
    }

    // ------------------------------------------------------------------------
    // Quote of the day
    // ------------------------------------------------------------------------

    /// The day's quote, chosen from the date on first request and kept
    pub fn quote_of_day(&mut self) -> String {
        if let Some(quote) = &self.record.quote_of_day {
            return quote.clone();
        }

        let index = self.record.date.num_days_from_ce().rem_euclid(QUOTES.len() as i32) as usize;
        let quote = QUOTES[index].to_string();
        self.record.quote_of_day = Some(quote.clone());
        self.persist();
        quote
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.store.load_history()
    }

    /// The last `days` archived days, oldest first
    pub fn recent_history(&self, days: usize) -> Vec<HistoryEntry> {
        let mut history = self.store.load_history();
        let skip = history.len().saturating_sub(days);
        history.drain(..skip);
        history
    }

    /// Consecutive most-recent archived days that met the protein goal
    pub fn protein_streak(&self) -> usize {
        protein_streak(&self.store.load_history())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;
    use rust_decimal_macros::dec;

    use crate::db::MemoryStore;
    use crate::ledger::clock::FixedClock;
    use crate::ledger::store::tests::{day, BrokenStore};

    type Ledger = DailyLedger<Arc<MemoryStore>, Arc<FixedClock>>;

    fn open_on(d: u32) -> (Ledger, Arc<MemoryStore>, Arc<FixedClock>) {
        let storage = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::on(day(d)));
        let ledger = DailyLedger::open(LedgerStore::new(storage.clone(), clock.clone()));
        (ledger, storage, clock)
    }

    fn reopen(storage: &Arc<MemoryStore>, clock: &Arc<FixedClock>) -> Ledger {
        DailyLedger::open(LedgerStore::new(storage.clone(), clock.clone()))
    }

    fn chicken() -> MealInput {
        MealInput {
            name: "Chicken breast".to_string(),
            quantity: dec!(1.5),
            protein: dec!(46.5),
            carbs: dec!(0),
            fat: dec!(5.4),
            calories: dec!(247.5),
        }
    }

    fn oats() -> MealInput {
        MealInput {
            name: "Oats".to_string(),
            quantity: dec!(1),
            protein: dec!(13.2),
            carbs: dec!(67.7),
            fat: dec!(6.5),
            calories: dec!(389),
        }
    }

    #[test]
    fn test_add_meal_updates_totals_and_storage() {
        let (mut ledger, storage, clock) = open_on(25);

        let meal = ledger.add_meal(chicken()).unwrap();
        assert_eq!(meal.id, 1);
        assert_eq!(meal.timestamp, clock.now());

        let second = ledger.add_meal(oats()).unwrap();
        assert_eq!(second.id, 2);

        let totals = ledger.totals();
        assert_eq!(totals.protein, dec!(59.7));
        assert_eq!(totals.carbs, dec!(67.7));
        assert_eq!(totals.fat, dec!(11.9));
        assert_eq!(totals.calories, 637);

        let reloaded = reopen(&storage, &clock);
        assert_eq!(reloaded.record().meals.len(), 2);
        assert_eq!(reloaded.totals(), totals);
    }

    #[test]
    fn test_rejected_meal_leaves_ledger_unchanged() {
        let (mut ledger, storage, clock) = open_on(25);
        ledger.add_meal(oats()).unwrap();
        let before = ledger.record().clone();

        let negative_protein = MealInput { protein: dec!(-5), ..chicken() };
        assert_eq!(
            ledger.add_meal(negative_protein),
            Err(ValidationError::NegativeNutrient { field: "protein" })
        );
        let zero_calories = MealInput { calories: dec!(0), ..chicken() };
        assert_eq!(ledger.add_meal(zero_calories), Err(ValidationError::NonPositiveCalories));
        let negative_calories = MealInput { calories: dec!(-1), ..chicken() };
        assert_eq!(ledger.add_meal(negative_calories), Err(ValidationError::NonPositiveCalories));

        assert_eq!(ledger.record(), &before);
        assert_eq!(reopen(&storage, &clock).record(), &before);
    }

    #[test]
    fn test_delete_meal() {
        let (mut ledger, storage, clock) = open_on(25);
        let chicken = ledger.add_meal(chicken()).unwrap();
        ledger.add_meal(oats()).unwrap();

        let totals = ledger.delete_meal(chicken.id);
        assert_eq!(totals.protein, dec!(13.2));
        assert_eq!(totals.calories, 389);
        assert_eq!(ledger.record().meals.len(), 1);
        assert_eq!(reopen(&storage, &clock).totals(), totals);

        assert_eq!(ledger.delete_meal(999), totals);
        assert_eq!(ledger.record().meals.len(), 1);
    }

    #[test]
    fn test_ids_stay_unique_after_delete() {
        let (mut ledger, _storage, _clock) = open_on(25);
        ledger.add_meal(oats()).unwrap();
        let second = ledger.add_meal(oats()).unwrap();
        ledger.delete_meal(1);
        let third = ledger.add_meal(oats()).unwrap();
        assert_ne!(third.id, second.id);
    }

    #[test]
    fn test_water_floor_at_zero() {
        let (mut ledger, _storage, _clock) = open_on(25);
        assert_eq!(ledger.add_water(250), 250);
        assert_eq!(ledger.add_water(250), 500);
        assert_eq!(ledger.add_water(-300), 200);
        assert_eq!(ledger.add_water(-1000), 0);
        assert_eq!(ledger.record().water_ml, 0);
        assert_eq!(ledger.add_water(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_water_sleep_weight_do_not_touch_totals() {
        let (mut ledger, storage, clock) = open_on(25);
        ledger.add_meal(oats()).unwrap();
        let totals = ledger.totals();

        ledger.set_water(1500);
        ledger.set_sleep(dec!(8.5)).unwrap();
        ledger.set_weight("75000g").unwrap();

        assert_eq!(ledger.totals(), totals);
        let reloaded = reopen(&storage, &clock);
        assert_eq!(reloaded.record().water_ml, 1500);
        assert_eq!(reloaded.record().sleep_hours, dec!(8.5));
        assert_eq!(reloaded.record().weight, Some(dec!(75)));

        ledger.clear_weight();
        assert_eq!(reopen(&storage, &clock).record().weight, None);
    }

    #[test]
    fn test_weight_rejection_keeps_previous_value() {
        let (mut ledger, _storage, _clock) = open_on(25);
        assert_eq!(ledger.set_weight("75kg"), Ok(dec!(75)));
        assert_eq!(ledger.set_weight("invalid"), Err(ValidationError::InvalidWeightFormat));
        assert_eq!(ledger.record().weight, Some(dec!(75)));
    }

    #[test]
    fn test_sleep_rejection() {
        let (mut ledger, _storage, _clock) = open_on(25);
        assert_eq!(ledger.set_sleep(dec!(-2)), Err(ValidationError::InvalidSleepHours));
        assert_eq!(ledger.record().sleep_hours, dec!(7));
    }

    #[test]
    fn test_set_goals() {
        let (mut ledger, storage, clock) = open_on(25);
        let goals = Goals { protein: dec!(180), water: Some(3000), ..Goals::default() };
        ledger.set_goals(goals.clone()).unwrap();
        assert_eq!(reopen(&storage, &clock).record().goals, goals);

        let bad = Goals { calories: dec!(0), ..Goals::default() };
        assert_eq!(
            ledger.set_goals(bad),
            Err(ValidationError::NonPositiveGoal { field: "calories" })
        );
        assert_eq!(ledger.record().goals, goals);
    }

    #[test]
    fn test_goal_progress() {
        let (mut ledger, _storage, _clock) = open_on(25);
        ledger
            .set_goals(Goals { water: Some(3000), ..Goals::default() })
            .unwrap();
        ledger.add_meal(chicken()).unwrap();
        ledger.set_water(750);

        let progress = ledger.goal_progress();
        assert_eq!(progress.protein, dec!(31.0));
        assert_eq!(progress.calories, dec!(9.9));
        assert_eq!(progress.carbs, dec!(0));
        assert_eq!(progress.water, Some(dec!(25.0)));
    }

    #[test]
    fn test_suggestions_follow_logged_meals() {
        let (mut ledger, _storage, _clock) = open_on(25);
        assert_eq!(ledger.suggestions().len(), 2);

        ledger
            .add_meal(MealInput { protein: dec!(134.9), calories: dec!(2300), ..chicken() })
            .unwrap();
        let short = ledger.suggestions();
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].deficit, 15);

        ledger
            .set_goals(Goals { protein: dec!(140), ..Goals::default() })
            .unwrap();
        assert!(ledger.suggestions().is_empty());
    }

    #[test]
    fn test_quote_is_stable_for_the_day() {
        let (mut ledger, storage, clock) = open_on(25);
        let quote = ledger.quote_of_day();
        assert!(QUOTES.contains(&quote.as_str()));
        assert_eq!(ledger.quote_of_day(), quote);

        let mut reloaded = reopen(&storage, &clock);
        assert_eq!(reloaded.record().quote_of_day.as_deref(), Some(quote.as_str()));
        assert_eq!(reloaded.quote_of_day(), quote);
    }

    #[test]
    fn test_open_rolls_over_once() {
        let (mut ledger, storage, clock) = open_on(24);
        ledger.add_meal(chicken()).unwrap();
        ledger.quote_of_day();
        assert!(ledger.archived_on_open().is_none());

        clock.advance(Duration::days(1));
        let next = reopen(&storage, &clock);
        let archived = next.archived_on_open().cloned().unwrap();
        assert_eq!(archived.date, day(24));
        assert_eq!(archived.total_protein, dec!(46.5));
        assert_eq!(archived.total_calories, 248);
        assert!(!archived.met_protein_goal);

        assert_eq!(next.record().date, day(25));
        assert!(next.record().meals.is_empty());
        assert_eq!(next.record().quote_of_day, None);
        assert_eq!(next.totals(), Totals::zero());

        let again = reopen(&storage, &clock);
        assert!(again.archived_on_open().is_none());
        assert_eq!(again.history(), vec![archived]);
    }

    #[test]
    fn test_recent_history_and_streak() {
        let (mut ledger, storage, clock) = open_on(1);
        for _ in 0..8 {
            ledger
                .add_meal(MealInput { protein: dec!(160), ..chicken() })
                .unwrap();
            clock.advance(Duration::days(1));
            ledger = reopen(&storage, &clock);
        }
        // a day that misses the goal, then one that meets it
        clock.advance(Duration::days(1));
        ledger = reopen(&storage, &clock);
        ledger
            .add_meal(MealInput { protein: dec!(150), ..chicken() })
            .unwrap();
        clock.advance(Duration::days(1));
        ledger = reopen(&storage, &clock);

        let history = ledger.history();
        assert_eq!(history.len(), 10);
        assert!(!history[8].met_protein_goal);
        assert_eq!(ledger.protein_streak(), 1);

        let recent = ledger.recent_history(7);
        assert_eq!(recent.len(), 7);
        assert_eq!(recent.last(), history.last());
        assert_eq!(ledger.recent_history(50).len(), 10);
    }

    #[test]
    fn test_broken_storage_still_serves_a_session() {
        let clock = FixedClock::on(day(25));
        let mut ledger = DailyLedger::open(LedgerStore::new(BrokenStore, clock));
        assert_eq!(ledger.record().date, day(25));
        let meal = ledger.add_meal(oats()).unwrap();
        assert_eq!(ledger.totals().calories, 389);
        assert_eq!(ledger.delete_meal(meal.id), Totals::zero());
        assert!(ledger.history().is_empty());
    }
}
