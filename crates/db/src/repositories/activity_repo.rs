//! Repository for the `activity_logs` table.

use sqlx::PgPool;

use crate::models::activity::ActivityRow;

pub struct ActivityRepo;

impl ActivityRepo {
    /// The `limit` most recent entries, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<ActivityRow>, sqlx::Error> {
        sqlx::query_as::<_, ActivityRow>(
            "SELECT id, kind, message, created_at, updated_at FROM activity_logs \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
