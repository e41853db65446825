//! Meal model
//!
//! One logged food entry on the current day.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::validation::{validate_meal, ValidationError};

fn default_quantity() -> Decimal {
    Decimal::ONE
}

/// A logged meal. Nutrient values are for the whole entry, not per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default, deserialize_with = "lenient::integer::deserialize")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text::deserialize")]
    pub name: String,
    #[serde(default = "default_quantity", with = "lenient::number")]
    pub quantity: Decimal,
    #[serde(default, with = "lenient::number")]
    pub protein: Decimal,
    #[serde(default, with = "lenient::number")]
    pub carbs: Decimal,
    #[serde(default, with = "lenient::number")]
    pub fat: Decimal,
    #[serde(default, with = "lenient::number")]
    pub calories: Decimal,
    #[serde(default, deserialize_with = "lenient::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

/// Data for logging a meal
#[derive(Debug, Clone, PartialEq)]
pub struct MealInput {
    pub name: String,
    pub quantity: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub calories: Decimal,
}

impl MealInput {
    /// Validate and stamp the input into a meal
    pub fn into_meal(self, id: i64, timestamp: DateTime<Utc>) -> Result<Meal, ValidationError> {
        validate_meal(&self)?;
        Ok(Meal {
            id,
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            calories: self.calories,
            timestamp,
        })
    }
}

/// Next free meal id: one past the largest in use
pub fn next_meal_id(meals: &[Meal]) -> i64 {
    meals.iter().map(|m| m.id).max().map_or(1, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(name: &str) -> MealInput {
        MealInput {
            name: name.to_string(),
            quantity: dec!(1),
            protein: dec!(31),
            carbs: dec!(0),
            fat: dec!(3.6),
            calories: dec!(165),
        }
    }

    #[test]
    fn test_into_meal_trims_name() {
        let meal = input("  Chicken breast ").into_meal(4, DateTime::<Utc>::default()).unwrap();
        assert_eq!(meal.name, "Chicken breast");
        assert_eq!(meal.id, 4);
    }

    #[test]
    fn test_next_meal_id() {
        assert_eq!(next_meal_id(&[]), 1);
        let a = input("a").into_meal(3, DateTime::<Utc>::default()).unwrap();
        let b = input("b").into_meal(9, DateTime::<Utc>::default()).unwrap();
        assert_eq!(next_meal_id(&[a, b]), 10);
    }

    #[test]
    fn test_lenient_meal_fields() {
        let meal: Meal = serde_json::from_str(
            r#"{"id": 1729, "name": "Oats", "protein": "13.2", "carbs": null, "calories": 389}"#,
        )
        .unwrap();
        assert_eq!(meal.protein, dec!(13.2));
        assert_eq!(meal.carbs, Decimal::ZERO);
        assert_eq!(meal.fat, Decimal::ZERO);
        assert_eq!(meal.quantity, Decimal::ONE);
        assert_eq!(meal.calories, dec!(389));
    }

    #[test]
    fn test_lenient_name_and_timestamp() {
        let meal: Meal = serde_json::from_str(
            r#"{"id": 2, "name": null, "calories": 100, "timestamp": 1700000000000}"#,
        )
        .unwrap();
        assert_eq!(meal.name, "");
        assert_eq!(meal.timestamp, DateTime::from_timestamp_millis(1_700_000_000_000).unwrap());

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }
}
