//! Clan and clan member row models.

use rpgdash_core::clan::{Clan, ClanMember, ClanSettings, ClanStats};
use rpgdash_core::currency::Currency;
use rpgdash_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_json;

/// A row from the `clans` table.
#[derive(Debug, Clone, FromRow)]
pub struct ClanRow {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub description: Option<String>,
    pub points: i64,
    pub treasury: Option<serde_json::Value>,
    pub max_members: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `clan_members` table.
#[derive(Debug, Clone, FromRow)]
pub struct ClanMemberRow {
    pub id: DbId,
    pub clan_id: DbId,
    pub owner_key: String,
    pub role: String,
    pub contribution: i64,
    pub joined_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ClanMemberRow> for ClanMember {
    fn from(row: ClanMemberRow) -> Self {
        ClanMember {
            owner_key: row.owner_key,
            role: row.role,
            contribution: row.contribution,
            joined_at: row.joined_at,
        }
    }
}

impl ClanRow {
    /// Assemble the domain clan from this row and its members, which must
    /// already be in join order.
    pub fn into_clan(self, members: Vec<ClanMemberRow>) -> Clan {
        let treasury: Currency = decode_json(self.treasury, "treasury", &self.id.to_string());
        Clan {
            id: self.id,
            name: self.name,
            level: self.level,
            description: self.description,
            stats: ClanStats {
                points: self.points,
            },
            treasury,
            settings: ClanSettings {
                max_members: self.max_members,
                status: self.status,
            },
            members: members.into_iter().map(ClanMember::from).collect(),
        }
        .normalize()
    }
}
