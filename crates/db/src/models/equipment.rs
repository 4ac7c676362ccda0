//! Equipment row model.

use std::collections::BTreeMap;

use rpgdash_core::equipment::{EquippedItem, Equipment};
use rpgdash_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_json;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: DbId,
    pub owner_key: String,
    /// Slot name to item object, or null for an empty slot.
    pub slots: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        let slots: BTreeMap<String, Option<EquippedItem>> =
            decode_json(Some(row.slots), "slots", &row.owner_key);
        Equipment {
            owner_key: row.owner_key,
            slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_slots_survive_conversion() {
        let row = EquipmentRow {
            id: 1,
            owner_key: "7".into(),
            slots: json!({
                "weapon": {"name": "Iron Sword", "stats": {"attack": 5}},
                "head": null
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let equipment = Equipment::from(row);
        assert_eq!(equipment.slots.len(), 2);
        assert_eq!(equipment.equipped_items().count(), 1);
    }

    #[test]
    fn fractional_bonus_does_not_empty_the_record() {
        let row = EquipmentRow {
            id: 2,
            owner_key: "8".into(),
            slots: json!({
                "weapon": {"name": "Iron Sword", "stats": {"attack": 5}},
                "ring": {"name": "Lucky Band", "stats": {"luck": 1.5}}
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let equipment = Equipment::from(row);
        assert_eq!(equipment.equipped_items().count(), 2);
        let bonus: i64 = equipment
            .equipped_items()
            .filter_map(|item| item.stats.as_ref()?.get("attack").copied())
            .sum();
        assert_eq!(bonus, 5);
    }
}
