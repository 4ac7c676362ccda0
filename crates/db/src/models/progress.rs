//! Level progress row model.

use rpgdash_core::progress::LevelProgress;
use rpgdash_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `level_progress` table.
#[derive(Debug, Clone, FromRow)]
pub struct LevelProgressRow {
    pub id: DbId,
    pub owner_key: String,
    pub level: i32,
    pub xp: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<LevelProgressRow> for LevelProgress {
    fn from(row: LevelProgressRow) -> Self {
        LevelProgress {
            owner_key: row.owner_key,
            level: row.level,
            xp: row.xp,
        }
        .normalize()
    }
}
