//! Daily nutrition goals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

pub const DEFAULT_PROTEIN_GOAL: i64 = 150;
pub const DEFAULT_CARBS_GOAL: i64 = 300;
pub const DEFAULT_FAT_GOAL: i64 = 70;
pub const DEFAULT_CALORIES_GOAL: i64 = 2500;

/// Per-nutrient daily targets, carried forward across days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default = "Goals::default_protein", with = "lenient::number")]
    pub protein: Decimal,
    #[serde(default = "Goals::default_carbs", with = "lenient::number")]
    pub carbs: Decimal,
    #[serde(default = "Goals::default_fat", with = "lenient::number")]
    pub fat: Decimal,
    #[serde(default = "Goals::default_calories", with = "lenient::number")]
    pub calories: Decimal,
    /// Water target in milliliters
    #[serde(
        default,
        deserialize_with = "lenient::optional_whole::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub water: Option<u32>,
}

impl Goals {
    fn default_protein() -> Decimal {
        Decimal::from(DEFAULT_PROTEIN_GOAL)
    }

    fn default_carbs() -> Decimal {
        Decimal::from(DEFAULT_CARBS_GOAL)
    }

    fn default_fat() -> Decimal {
        Decimal::from(DEFAULT_FAT_GOAL)
    }

    fn default_calories() -> Decimal {
        Decimal::from(DEFAULT_CALORIES_GOAL)
    }

    /// Replace any non-positive target with its default
    ///
    /// Persisted goals that were blank or garbled read as zero; a zero goal
    /// would make every day "met".
    pub fn sanitized(self) -> Self {
        let keep = |value: Decimal, fallback: fn() -> Decimal| {
            if value > Decimal::ZERO {
                value
            } else {
                fallback()
            }
        };
        Self {
            protein: keep(self.protein, Self::default_protein),
            carbs: keep(self.carbs, Self::default_carbs),
            fat: keep(self.fat, Self::default_fat),
            calories: keep(self.calories, Self::default_calories),
            water: self.water.filter(|ml| *ml > 0),
        }
    }
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            protein: Self::default_protein(),
            carbs: Self::default_carbs(),
            fat: Self::default_fat(),
            calories: Self::default_calories(),
            water: None,
        }
    }
}
