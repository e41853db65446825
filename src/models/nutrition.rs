//! Shared nutrition totals
//!
//! `Nutrients` holds exact running sums; `Totals` is the rounded, display-facing
//! form stored on the daily record.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Meal;
use crate::nutrition::decimal;

/// Unrounded nutrient sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nutrients {
    pub calories: Decimal,
    pub protein: Decimal,  // grams
    pub carbs: Decimal,    // grams
    pub fat: Decimal,      // grams
}

impl Nutrients {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add one meal's nutrients to the running sums
    pub fn add_meal(&self, meal: &Meal) -> Self {
        Self {
            calories: decimal::add(self.calories, meal.calories),
            protein: decimal::add(self.protein, meal.protein),
            carbs: decimal::add(self.carbs, meal.carbs),
            fat: decimal::add(self.fat, meal.fat),
        }
    }

    /// Apply the display rounding policy: whole calories, macros to 0.1 g
    pub fn rounded(&self) -> Totals {
        Totals {
            calories: decimal::round(self.calories, 0).to_i64().unwrap_or(0),
            protein: decimal::round(self.protein, 1),
            carbs: decimal::round(self.carbs, 1),
            fat: decimal::round(self.fat, 1),
        }
    }
}

impl<'a> std::iter::Sum<&'a Meal> for Nutrients {
    fn sum<I: Iterator<Item = &'a Meal>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, meal| acc.add_meal(meal))
    }
}

/// Rounded daily totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Totals {
    #[serde(deserialize_with = "lenient::integer::deserialize")]
    pub calories: i64,
    #[serde(with = "lenient::number")]
    pub protein: Decimal,
    #[serde(with = "lenient::number")]
    pub carbs: Decimal,
    #[serde(with = "lenient::number")]
    pub fat: Decimal,
}

impl Totals {
    pub fn zero() -> Self {
        Self::default()
    }
}
