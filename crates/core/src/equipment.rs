//! Equipment records: one per owner, mapping slot names to equipped items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::types::OwnerKey;

/// An item sitting in an equipment slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquippedItem {
    pub name: String,
    /// Stat bonuses keyed by stat name as written by the bot (`attack`,
    /// `atk`, `maxHp`, ...). Unknown names are carried but never applied;
    /// fractional bonuses are truncated and non-numeric ones skipped.
    #[serde(deserialize_with = "lenient::bonus_map")]
    pub stats: Option<BTreeMap<String, i64>>,
}

/// A player's equipment. Slots may be present but empty (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub owner_key: OwnerKey,
    pub slots: BTreeMap<String, Option<EquippedItem>>,
}

impl Equipment {
    /// An equipment record with no slots, used when the owner has none.
    pub fn empty(owner_key: impl Into<OwnerKey>) -> Self {
        Self {
            owner_key: owner_key.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Items in occupied slots, in slot-name order.
    pub fn equipped_items(&self) -> impl Iterator<Item = &EquippedItem> {
        self.slots.values().filter_map(Option::as_ref)
    }
}
