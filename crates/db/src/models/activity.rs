//! Activity log row model.

use rpgdash_core::activity::{ActivityEntry, ActivityKind};
use rpgdash_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: DbId,
    pub kind: String,
    pub message: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ActivityRow> for ActivityEntry {
    fn from(row: ActivityRow) -> Self {
        ActivityEntry {
            id: row.id,
            kind: ActivityKind::parse(&row.kind),
            message: row.message,
            timestamp: row.created_at,
        }
    }
}
