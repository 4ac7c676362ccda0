//! Multi-denomination currency and its fixed conversion table.
//!
//! Balances are stored per coin. Ranking by wealth needs a single number, so
//! every balance is converted into bronze, the smallest unit.

use serde::{Deserialize, Serialize};

use crate::lenient;

// ---------------------------------------------------------------------------
// Conversion table
// ---------------------------------------------------------------------------

/// Bronze per silver.
pub const BRONZE_PER_SILVER: i64 = 100;

/// Bronze per gold (1 gold = 100 silver).
pub const BRONZE_PER_GOLD: i64 = 100 * BRONZE_PER_SILVER;

/// Bronze per platinum (1 platinum = 1,000 gold = 100,000 silver).
pub const BRONZE_PER_PLATINUM: i64 = 1_000 * BRONZE_PER_GOLD;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A balance split across the four coin denominations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    #[serde(deserialize_with = "lenient::integer")]
    pub platinum: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub gold: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub silver: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub bronze: i64,
}

impl Currency {
    /// Total value expressed in bronze. Saturates instead of overflowing so
    /// a corrupt balance cannot wrap around to a small number.
    pub fn total_value(&self) -> i64 {
        self.platinum
            .saturating_mul(BRONZE_PER_PLATINUM)
            .saturating_add(self.gold.saturating_mul(BRONZE_PER_GOLD))
            .saturating_add(self.silver.saturating_mul(BRONZE_PER_SILVER))
            .saturating_add(self.bronze)
    }

    /// Whether any denomination holds a positive balance.
    pub fn has_funds(&self) -> bool {
        self.platinum > 0 || self.gold > 0 || self.silver > 0 || self.bronze > 0
    }

    /// Negative coin counts are treated as empty.
    pub fn normalize(self) -> Self {
        Self {
            platinum: self.platinum.max(0),
            gold: self.gold.max(0),
            silver: self.silver.max(0),
            bronze: self.bronze.max(0),
        }
    }
}

/// A market price: either a bare gold amount or a full currency block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Gold(i64),
    Coins(Currency),
}

impl Price {
    /// Value of the price in bronze.
    pub fn total_value(&self) -> i64 {
        match self {
            Price::Gold(gold) => gold.saturating_mul(BRONZE_PER_GOLD),
            Price::Coins(coins) => coins.total_value(),
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Gold(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(platinum: i64, gold: i64, silver: i64, bronze: i64) -> Currency {
        Currency {
            platinum,
            gold,
            silver,
            bronze,
        }
    }

    #[test]
    fn one_platinum_outranks_ten_gold_and_999_silver() {
        let platinum = coins(1, 0, 0, 0).total_value();
        let gold = coins(0, 10, 0, 0).total_value();
        let silver = coins(0, 0, 999, 0).total_value();
        assert!(platinum > gold);
        assert!(gold > silver);
    }

    #[test]
    fn conversion_table_matches_documented_ratios() {
        assert_eq!(coins(1, 0, 0, 0).total_value(), coins(0, 1_000, 0, 0).total_value());
        assert_eq!(coins(0, 1, 0, 0).total_value(), coins(0, 0, 100, 0).total_value());
        assert_eq!(coins(0, 0, 1, 0).total_value(), 100);
    }

    #[test]
    fn total_value_saturates() {
        assert_eq!(coins(i64::MAX, 1, 0, 0).total_value(), i64::MAX);
    }

    #[test]
    fn missing_denominations_default_to_zero() {
        let parsed: Currency = serde_json::from_str(r#"{"gold": 3}"#).unwrap();
        assert_eq!(parsed, coins(0, 3, 0, 0));
    }

    #[test]
    fn has_funds_ignores_empty_balance() {
        assert!(!Currency::default().has_funds());
        assert!(coins(0, 0, 0, 1).has_funds());
    }

    #[test]
    fn price_accepts_number_or_block() {
        let plain: Price = serde_json::from_str("250").unwrap();
        assert_eq!(plain, Price::Gold(250));

        let block: Price = serde_json::from_str(r#"{"silver": 5}"#).unwrap();
        assert_eq!(block, Price::Coins(coins(0, 0, 5, 0)));
        assert_eq!(block.total_value(), 500);
    }
}
