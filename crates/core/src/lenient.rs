//! Tolerant decoders for numbers written by the game bot.
//!
//! The bot occasionally stores fractional values (`2.5`) where the dashboard
//! expects whole numbers. These decoders truncate toward zero instead of
//! failing the surrounding record.

use std::collections::BTreeMap;

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn to_i64(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            // `as` saturates at the i64 bounds.
            Number::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Number::Float(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bonus {
    Number(Number),
    Other(IgnoredAny),
}

/// Decode an integer, accepting fractional JSON numbers.
///
/// Non-numeric values are still an error, so the caller can drop just that
/// field and keep its default.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Number::deserialize(deserializer)?
        .to_i64()
        .ok_or_else(|| de::Error::custom("expected a finite number"))
}

/// Decode an optional map of stat bonuses. Entries whose value is not a
/// number are skipped; the rest of the map survives.
pub fn bonus_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Bonus>>::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(key, bonus)| match bonus {
                Bonus::Number(n) => n.to_i64().map(|n| (key, n)),
                Bonus::Other(_) => None,
            })
            .collect()
    }))
}
