//! Inventory row model.

use rpgdash_core::inventory::{Inventory, InventoryItem};
use rpgdash_core::types::{DbId, Timestamp};
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `inventories` table.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryRow {
    pub id: DbId,
    pub owner_key: String,
    /// Array of item stacks; malformed entries are skipped one by one.
    pub items: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        let items = match row.items {
            Value::Array(entries) => entries
                .into_iter()
                .filter_map(|entry| match serde_json::from_value::<InventoryItem>(entry) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(owner_key = %row.owner_key, error = %e, "Skipping malformed inventory item");
                        None
                    }
                })
                .collect(),
            Value::Null => Vec::new(),
            other => {
                tracing::warn!(owner_key = %row.owner_key, kind = ?other, "Inventory items is not an array");
                Vec::new()
            }
        };
        Inventory {
            owner_key: row.owner_key,
            items,
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn row(items: Value) -> InventoryRow {
        InventoryRow {
            id: 1,
            owner_key: "7".into(),
            items,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn malformed_item_is_skipped_alone() {
        let inventory = Inventory::from(row(json!([
            {"name": "Potion", "quantity": 2},
            "junk",
            {"name": "Ether", "quantity": 1.5}
        ])));
        let names: Vec<&str> = inventory.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Potion", "Ether"]);
        assert_eq!(inventory.items[1].quantity, 1);
    }

    #[test]
    fn non_array_items_decode_to_empty() {
        let inventory = Inventory::from(row(json!({"name": "Potion"})));
        assert!(inventory.items.is_empty());
        assert_eq!(inventory.owner_key, "7");
    }
}
