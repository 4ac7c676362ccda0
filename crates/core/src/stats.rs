//! Stat aggregation: base character attributes plus equipment bonuses.
//!
//! The merged block produced here is the single source for displayed stats
//! and for any derived combat value computed elsewhere. Merging is additive
//! only; multiplicative modifiers (race, buffs) belong to the game layer.

use serde::Serialize;

use crate::character::{Character, StatBlock, StatKey};
use crate::equipment::Equipment;

/// Result of merging a character's base stats with its equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregatedStats {
    /// The character's own stat block, after defaulting.
    pub base: StatBlock,
    /// Sum of every equipped item's bonuses (zero where nothing applies).
    pub equipment_bonus: StatBlock,
    /// `base + equipment_bonus`, field by field.
    pub total: StatBlock,
}

/// Sum the stat bonuses of every occupied slot.
///
/// Bonus names outside the stat block are ignored. A missing equipment
/// record contributes nothing.
pub fn equipment_bonus(equipment: Option<&Equipment>) -> StatBlock {
    let mut bonus = StatBlock::zeroed();
    let Some(equipment) = equipment else {
        return bonus;
    };

    for item in equipment.equipped_items() {
        let Some(stats) = &item.stats else {
            continue;
        };
        for (name, amount) in stats {
            match StatKey::parse(name) {
                Some(key) => bonus.add(key, *amount),
                None => tracing::debug!(
                    owner_key = %equipment.owner_key,
                    item = %item.name,
                    stat = %name,
                    "Ignoring unknown equipment bonus"
                ),
            }
        }
    }
    bonus
}

/// Merge `character`'s base stats with bonuses from `equipment`.
///
/// Pure; never fails. `None` equipment is the same as an empty record.
pub fn aggregate(character: &Character, equipment: Option<&Equipment>) -> AggregatedStats {
    let base = character.stats;
    let equipment_bonus = equipment_bonus(equipment);
    AggregatedStats {
        base,
        equipment_bonus,
        total: base.plus(&equipment_bonus),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
