//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - A conversion into the domain record that applies the defaulting rules
//! - `Deserialize` DTOs for the few writes the dashboard performs

pub mod activity;
pub mod character;
pub mod clan;
pub mod equipment;
pub mod inventory;
pub mod market;
pub mod permission;
pub mod progress;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode an optional JSONB column, falling back to `T::default()` when
/// the column is NULL or is not an object of the expected shape.
///
/// Objects are salvaged key by key: a key whose value cannot be decoded is
/// dropped (its field takes the default) and every other key is kept.
pub(crate) fn decode_json<T: DeserializeOwned + Default>(
    value: Option<Value>,
    column: &'static str,
    row_key: &str,
) -> T {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return T::default();
    };
    let fields = match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => return decoded,
        Err(e) => match value {
            Value::Object(fields) => fields,
            _ => {
                tracing::warn!(column, row_key, error = %e, "Malformed JSON column, using defaults");
                return T::default();
            }
        },
    };

    let mut kept = Map::new();
    for (key, field) in fields {
        kept.insert(key.clone(), field);
        if let Err(e) = serde_json::from_value::<T>(Value::Object(kept.clone())) {
            kept.remove(&key);
            tracing::warn!(column, row_key, key = %key, error = %e, "Dropping malformed JSON field");
        }
    }
    serde_json::from_value(Value::Object(kept)).unwrap_or_default()
}
