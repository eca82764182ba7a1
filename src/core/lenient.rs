//! Field deserializers for stored charts whose numbers were written as strings.
//!
//! Unreadable values fall back to the field default with a warning; they never
//! fail the whole configuration.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

fn parse_number<T>(value: &Value) -> Option<T>
where
    T: FromStr + DeserializeOwned,
{
    match value {
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

/// Accepts a number or a numeric string; anything else yields `fallback`.
pub(crate) fn number_or_default<'de, D, T>(
    deserializer: D,
    field: &'static str,
    fallback: T,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_number(&value).unwrap_or_else(|| {
        warn!(field, %value, "unreadable numeric value; using default");
        fallback
    }))
}

/// Like [`number_or_default`], but `null` and blank strings mean "unset".
pub(crate) fn optional_number<'de, D, T>(
    deserializer: D,
    field: &'static str,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(None),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        _ => {
            let parsed = parse_number(&value);
            if parsed.is_none() {
                warn!(field, %value, "unreadable numeric value; leaving unset");
            }
            Ok(parsed)
        }
    }
}

/// Declares `fn $name` usable with `#[serde(deserialize_with = "...")]` that
/// reads a `$ty` leniently and falls back to `$fallback`.
macro_rules! lenient_number {
    ($name:ident, $field:literal, $ty:ty, $fallback:expr) => {
        fn $name<'de, D>(deserializer: D) -> Result<$ty, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            $crate::core::lenient::number_or_default(deserializer, $field, $fallback)
        }
    };
}

pub(crate) use lenient_number;
