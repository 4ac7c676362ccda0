//! Inventory records: the items a player carries but has not equipped.

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::types::OwnerKey;

fn one() -> i64 {
    1
}

/// One stack of items in a player's bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default)]
    pub name: String,
    /// Items listed without a count are a single item.
    #[serde(default = "one", deserialize_with = "lenient::integer")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub owner_key: OwnerKey,
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    /// An empty bag, used when the owner has no inventory record.
    pub fn empty(owner_key: impl Into<OwnerKey>) -> Self {
        Self {
            owner_key: owner_key.into(),
            items: Vec::new(),
        }
    }

    /// Drops nameless and empty stacks.
    pub fn normalize(mut self) -> Self {
        self.items
            .retain(|item| !item.name.trim().is_empty() && item.quantity > 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_quantity_is_one() {
        let item: InventoryItem = serde_json::from_str(r#"{"name": "Potion"}"#).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn normalize_drops_empty_stacks() {
        let inventory = Inventory {
            owner_key: "1".into(),
            items: vec![
                InventoryItem { name: "Potion".into(), quantity: 3 },
                InventoryItem { name: " ".into(), quantity: 1 },
                InventoryItem { name: "Ether".into(), quantity: 0 },
            ],
        }
        .normalize();
        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.items[0].name, "Potion");
    }
}
