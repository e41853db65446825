//! Lenient serde helpers for persisted numbers
//!
//! Stored records may come from older builds or hand edits. Numeric fields
//! accept JSON numbers or numeric strings; anything else reads as zero.
//! Text, timestamps and nested objects fall back to their defaults. Decimals
//! are written back as plain JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::nutrition::decimal;

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => decimal::parse_decimal(&n.to_string()),
        Value::String(s) => decimal::parse_decimal(s),
        _ => None,
    }
}

/// `Decimal` as a JSON number, zero when missing or non-numeric
pub mod number {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(decimal::to_f64(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_decimal(&value).unwrap_or(Decimal::ZERO))
    }
}

/// `Option<Decimal>`; null and non-numeric values read as `None`
pub mod optional_number {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&decimal::to_f64(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_decimal(&value))
    }
}

/// Non-negative whole number, truncating fractions and flooring at zero
pub mod whole {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = value_to_decimal(&value).unwrap_or(Decimal::ZERO);
        if parsed.is_sign_negative() {
            return Ok(0);
        }
        Ok(parsed.trunc().to_u32().unwrap_or(u32::MAX))
    }
}

/// Integer as-is, non-numeric reads as zero
pub mod integer {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_decimal(&value)
            .and_then(|d| d.trunc().to_i64())
            .unwrap_or(0))
    }
}

/// Non-negative whole number or `None` when missing or non-numeric
pub mod optional_whole {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_decimal(&value).map(|parsed| {
            if parsed.is_sign_negative() {
                0
            } else {
                parsed.trunc().to_u32().unwrap_or(u32::MAX)
            }
        }))
    }
}

/// String field; anything that is not a string reads as empty
pub mod text {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            _ => Ok(String::new()),
        }
    }
}

/// Optional string; non-strings read as `None`
pub mod optional_text {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

/// Instant as RFC 3339 text or epoch milliseconds; unparseable reads as the epoch
pub mod timestamp {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| from_millis(decimal::parse_decimal(s)?)),
            Value::Number(_) => value_to_decimal(&value).and_then(from_millis),
            _ => None,
        };
        Ok(parsed.unwrap_or_default())
    }

    fn from_millis(ms: Decimal) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(ms.trunc().to_i64()?)
    }
}

/// Nested value that falls back to `T::default()` when it does not parse
pub mod or_default {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            debug!(error = %e, "Replacing unreadable value with default");
            T::default()
        }))
    }
}

/// List whose unreadable items are dropped; a non-list reads as empty
pub mod list {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    debug!(error = %e, "Dropping unreadable list item");
                    None
                }
            })
            .collect())
    }
}
