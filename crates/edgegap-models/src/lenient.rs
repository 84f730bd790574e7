//! Field deserializers that never fail.
//!
//! Response models are filled field-by-field: an absent key takes the
//! field's default (via `#[serde(default)]` on the container), and a key
//! whose value has the wrong type does too (via these helpers). A model
//! therefore never holds a half-parsed numeric field, and one odd value in
//! a payload never rejects the whole body.
//!
//! Each helper first deserializes into a generic [`Value`] (which accepts
//! any JSON) and then coerces.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Renders a scalar as text: strings verbatim, numbers and booleans via
/// their JSON form, everything else as `""`.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Integers outside the `i32` range, fractions, and non-numbers become 0.
pub(crate) fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or_default())
}

pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or_default())
}

/// A string→string map. Non-string values keep their JSON text so that
/// nested objects (e.g. full ticket records) are not lost.
pub(crate) fn string_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, text)
        })
        .collect())
}

/// A nested model. `null` or a non-object becomes `T::default()`.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_object(value))
}

/// A name→model map. Entries whose value is not an object are dropped.
pub(crate) fn object_map<'de, D, T>(
    deserializer: D,
) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter(|(_, v)| v.is_object())
        .map(|(k, v)| (k, coerce_object(v)))
        .collect())
}

fn coerce_object<T: DeserializeOwned + Default>(value: Value) -> T {
    if !value.is_object() {
        return T::default();
    }
    // Every model field is itself lenient, so this only fails if a model
    // forgot its `#[serde(default)]`.
    T::deserialize(value).unwrap_or_default()
}
