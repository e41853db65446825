//! Input validation
//!
//! Rejected input leaves the ledger untouched; the error text is shown to the user.

use rust_decimal::Decimal;
use thiserror::Error;

use super::{Goals, MealInput};
use crate::nutrition::decimal;
use crate::nutrition::units::MassUnit;

/// Lightest accepted body weight
pub const MIN_WEIGHT_KG: i64 = 20;
/// Heaviest accepted body weight
pub const MAX_WEIGHT_KG: i64 = 300;
/// Upper bound for a night's sleep
pub const MAX_SLEEP_HOURS: i64 = 24;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Meal name is required")]
    EmptyName,

    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("Invalid {field} value: must not be negative")]
    NegativeNutrient { field: &'static str },

    #[error("Calories must be greater than zero")]
    NonPositiveCalories,

    #[error("Invalid weight format. Use format: 70kg or 70000g")]
    InvalidWeightFormat,

    #[error("Weight must be between 20kg and 300kg")]
    WeightOutOfRange,

    #[error("Sleep hours must be between 0 and 24")]
    InvalidSleepHours,

    #[error("Goal for {field} must be greater than zero")]
    NonPositiveGoal { field: &'static str },
}

/// Check a meal before it is logged
pub fn validate_meal(meal: &MealInput) -> Result<(), ValidationError> {
    if meal.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if meal.quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity);
    }

    for (field, value) in [
        ("protein", meal.protein),
        ("carbs", meal.carbs),
        ("fat", meal.fat),
    ] {
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeNutrient { field });
        }
    }

    if meal.calories <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveCalories);
    }

    Ok(())
}

/// Parse body weight input like `"75kg"` or `"75000g"` into kilograms
pub fn parse_weight(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();

    let split = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or(ValidationError::InvalidWeightFormat)?;
    let (number, suffix) = trimmed.split_at(split);

    // Only the short forms are accepted here
    let unit = match suffix.to_ascii_lowercase().as_str() {
        "g" | "kg" => MassUnit::from_str(suffix).ok_or(ValidationError::InvalidWeightFormat)?,
        _ => return Err(ValidationError::InvalidWeightFormat),
    };

    if !is_plain_number(number) {
        return Err(ValidationError::InvalidWeightFormat);
    }
    let value = decimal::parse_decimal(number).ok_or(ValidationError::InvalidWeightFormat)?;

    let kg = unit.to_kilograms(value);
    if kg < Decimal::from(MIN_WEIGHT_KG) || kg > Decimal::from(MAX_WEIGHT_KG) {
        return Err(ValidationError::WeightOutOfRange);
    }

    Ok(kg.normalize())
}

/// Digits with at most one decimal point, starting with a digit
fn is_plain_number(s: &str) -> bool {
    let mut dots = 0;
    s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| {
            if c == '.' {
                dots += 1;
                dots <= 1
            } else {
                c.is_ascii_digit()
            }
        })
}

pub fn validate_sleep(hours: Decimal) -> Result<Decimal, ValidationError> {
    if hours < Decimal::ZERO || hours > Decimal::from(MAX_SLEEP_HOURS) {
        return Err(ValidationError::InvalidSleepHours);
    }
    Ok(hours)
}

pub fn validate_goals(goals: &Goals) -> Result<(), ValidationError> {
    for (field, value) in [
        ("protein", goals.protein),
        ("carbs", goals.carbs),
        ("fat", goals.fat),
        ("calories", goals.calories),
    ] {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveGoal { field });
        }
    }
    if goals.water == Some(0) {
        return Err(ValidationError::NonPositiveGoal { field: "water" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn meal() -> MealInput {
        MealInput {
            name: "Greek yogurt".to_string(),
            quantity: dec!(1),
            protein: dec!(10),
            carbs: dec!(3.6),
            fat: dec!(0.4),
            calories: dec!(59),
        }
    }

    #[test]
    fn test_valid_meal() {
        assert_eq!(validate_meal(&meal()), Ok(()));
    }

    #[test]
    fn test_zero_macros_allowed() {
        let input = MealInput { protein: dec!(0), fat: dec!(0), ..meal() };
        assert_eq!(validate_meal(&input), Ok(()));
    }

    #[test]
    fn test_meal_rejections() {
        let blank = MealInput { name: "   ".to_string(), ..meal() };
        assert_eq!(validate_meal(&blank), Err(ValidationError::EmptyName));

        let no_quantity = MealInput { quantity: dec!(0), ..meal() };
        assert_eq!(validate_meal(&no_quantity), Err(ValidationError::NonPositiveQuantity));

        let negative_protein = MealInput { protein: dec!(-1), ..meal() };
        assert_eq!(
            validate_meal(&negative_protein),
            Err(ValidationError::NegativeNutrient { field: "protein" })
        );

        let zero_calories = MealInput { calories: dec!(0), ..meal() };
        assert_eq!(validate_meal(&zero_calories), Err(ValidationError::NonPositiveCalories));

        let negative_calories = MealInput { calories: dec!(-20), ..meal() };
        assert_eq!(validate_meal(&negative_calories), Err(ValidationError::NonPositiveCalories));
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("75kg"), Ok(dec!(75)));
        assert_eq!(parse_weight("75000g"), Ok(dec!(75)));
        assert_eq!(parse_weight("82.5KG"), Ok(dec!(82.5)));
        assert_eq!(parse_weight(" 70.25kg "), Ok(dec!(70.25)));
    }

    #[test]
    fn test_parse_weight_format_errors() {
        for bad in ["invalid", "75", "kg", "75 kg", "75lbs", ".5kg", "7.5.0kg", "-75kg", ""] {
            assert_eq!(
                parse_weight(bad),
                Err(ValidationError::InvalidWeightFormat),
                "input {:?}",
                bad
            );
        }
        assert_eq!(
            ValidationError::InvalidWeightFormat.to_string(),
            "Invalid weight format. Use format: 70kg or 70000g"
        );
    }

    #[test]
    fn test_parse_weight_range() {
        assert_eq!(parse_weight("19kg"), Err(ValidationError::WeightOutOfRange));
        assert_eq!(parse_weight("301kg"), Err(ValidationError::WeightOutOfRange));
        assert_eq!(parse_weight("500g"), Err(ValidationError::WeightOutOfRange));
        assert_eq!(parse_weight("20kg"), Ok(dec!(20)));
    }

    #[test]
    fn test_validate_sleep() {
        assert_eq!(validate_sleep(dec!(7.5)), Ok(dec!(7.5)));
        assert_eq!(validate_sleep(dec!(0)), Ok(dec!(0)));
        assert_eq!(validate_sleep(dec!(-1)), Err(ValidationError::InvalidSleepHours));
        assert_eq!(validate_sleep(dec!(25)), Err(ValidationError::InvalidSleepHours));
    }

    #[test]
    fn test_validate_goals() {
        assert_eq!(validate_goals(&Goals::default()), Ok(()));
        let bad = Goals { fat: dec!(0), ..Goals::default() };
        assert_eq!(validate_goals(&bad), Err(ValidationError::NonPositiveGoal { field: "fat" }));
    }
}
