//! Daily totals aggregation
//!
//! Sums meal nutrients exactly, then rounds for display: calories to a whole
//! number, protein, carbs and fat to one decimal place.

use crate::models::{Meal, Nutrients, Totals};

/// Exact nutrient sums over a meal list
pub fn sum_nutrients(meals: &[Meal]) -> Nutrients {
    meals.iter().sum()
}

/// Rounded totals over a meal list
pub fn recalc_totals(meals: &[Meal]) -> Totals {
    sum_nutrients(meals).rounded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn meal(id: i64, protein: Decimal, carbs: Decimal, fat: Decimal, calories: Decimal) -> Meal {
        Meal {
            id,
            name: format!("meal {}", id),
            quantity: Decimal::ONE,
            protein,
            carbs,
            fat,
            calories,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn test_empty_meals_are_zero() {
        assert_eq!(recalc_totals(&[]), Totals::zero());
        assert_eq!(sum_nutrients(&[]), Nutrients::zero());
    }

    #[test]
    fn test_totals_rounding_policy() {
        let meals = vec![
            meal(1, dec!(25.5), dec!(10.04), dec!(3.33), dec!(165.7)),
            meal(2, dec!(165.7), dec!(20.02), dec!(1.01), dec!(200.4)),
        ];
        let totals = recalc_totals(&meals);
        assert_eq!(totals.protein, dec!(191.2));
        assert_eq!(totals.carbs, dec!(30.1));
        assert_eq!(totals.fat, dec!(4.3));
        assert_eq!(totals.calories, 366);
    }

    #[test]
    fn test_calories_round_half_up() {
        let meals = vec![meal(1, dec!(0), dec!(0), dec!(0), dec!(99.5))];
        assert_eq!(recalc_totals(&meals).calories, 100);
    }

    #[test]
    fn test_many_small_fractions_do_not_drift() {
        let meals: Vec<Meal> = (1..=10)
            .map(|i| meal(i, dec!(0.1), dec!(0.1), dec!(0.1), dec!(10.1)))
            .collect();
        let sums = sum_nutrients(&meals);
        assert_eq!(sums.protein, dec!(1.0));
        assert_eq!(sums.calories, dec!(101.0));
        assert_eq!(recalc_totals(&meals).protein, dec!(1.0));
    }

    #[test]
    fn test_sum_keeps_unrounded_value() {
        let meals = vec![meal(1, dec!(149.96), dec!(0), dec!(0), dec!(1))];
        assert_eq!(sum_nutrients(&meals).protein, dec!(149.96));
        assert_eq!(recalc_totals(&meals).protein, dec!(150.0));
    }
}
