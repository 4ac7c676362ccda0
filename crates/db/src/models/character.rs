//! Character row model.

use rpgdash_core::character::{Advancement, Character, StatBlock};
use rpgdash_core::currency::Currency;
use rpgdash_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_json;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterRow {
    pub id: DbId,
    pub owner_key: String,
    pub name: Option<String>,
    pub race: Option<String>,
    pub job: Option<String>,
    pub level: i32,
    pub experience: i64,
    /// Partial stat block; missing attributes take their baselines.
    pub stats: Option<serde_json::Value>,
    pub platinum: i64,
    pub gold: i64,
    pub silver: i64,
    pub bronze: i64,
    pub reputation: i64,
    pub bounty: i64,
    pub killed_players: i64,
    pub rp_points: i64,
    pub monsters_killed: i64,
    pub items_crafted: i64,
    pub resources_gathered: i64,
    pub bosses_killed: i64,
    pub title: Option<String>,
    pub guild: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        let stats: StatBlock = decode_json(row.stats, "stats", &row.owner_key);
        Character {
            id: row.id,
            owner_key: row.owner_key,
            name: row.name.unwrap_or_default(),
            race: row.race.unwrap_or_default(),
            job: row.job.unwrap_or_default(),
            level: row.level,
            experience: row.experience,
            stats,
            currency: Currency {
                platinum: row.platinum,
                gold: row.gold,
                silver: row.silver,
                bronze: row.bronze,
            },
            reputation: row.reputation,
            bounty: row.bounty,
            killed_players: row.killed_players,
            rp_points: row.rp_points,
            advancement: Advancement {
                monsters_killed: row.monsters_killed,
                items_crafted: row.items_crafted,
                resources_gathered: row.resources_gathered,
                bosses_killed: row.bosses_killed,
            },
            title: row.title,
            guild: row.guild,
            description: row.description,
            emoji: row.emoji,
        }
        .normalize()
    }
}

/// Number of characters sharing one (defaulted) race value.
#[derive(Debug, Clone, FromRow)]
pub struct RaceCountRow {
    pub race: String,
    pub count: i64,
}
