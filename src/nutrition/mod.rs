//! Nutrition calculation module
//!
//! Exact decimal arithmetic, totals aggregation and mass unit conversion.

pub mod aggregate;
pub mod decimal;
pub mod units;

pub use aggregate::{recalc_totals, sum_nutrients};
pub use units::{convert_mass, MassUnit};
