//! Mass units and conversion constants
//!
//! Body weight is stored in kilograms; user input may arrive in grams.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::decimal;

/// Grams per kilogram
pub const GRAMS_PER_KG: i64 = 1000;

/// Mass unit accepted in weight input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
}

impl MassUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
        }
    }

    /// Parse a unit suffix, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Some(MassUnit::Gram),
            "kg" | "kilogram" | "kilograms" => Some(MassUnit::Kilogram),
            _ => None,
        }
    }

    /// Convert a value in this unit to kilograms
    pub fn to_kilograms(&self, value: Decimal) -> Decimal {
        match self {
            MassUnit::Gram => decimal::div(value, GRAMS_PER_KG),
            MassUnit::Kilogram => value,
        }
    }
}

/// Convert between mass units through grams
pub fn convert_mass(value: Decimal, from: MassUnit, to: MassUnit) -> Decimal {
    if from == to {
        return value;
    }
    let kg = from.to_kilograms(value);
    match to {
        MassUnit::Kilogram => kg,
        MassUnit::Gram => decimal::mul(kg, GRAMS_PER_KG),
    }
}
