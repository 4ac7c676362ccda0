//! Repository for the `level_progress` table.

use rpgdash_core::store::RecordQuery;
use sqlx::PgPool;

use crate::models::progress::LevelProgressRow;
use crate::query::{self, LEVEL_PROGRESS};

const COLUMNS: &str = "id, owner_key, level, xp, created_at, updated_at";

/// Chat-activity level tracking, keyed by owner.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Run a ranking query. Name searches match nothing here; callers
    /// resolve names to owner keys first.
    pub async fn find(
        pool: &PgPool,
        q: &RecordQuery,
    ) -> Result<Vec<LevelProgressRow>, sqlx::Error> {
        let clauses = query::build(q, &LEVEL_PROGRESS);
        let sql = format!(
            "SELECT {COLUMNS} FROM level_progress {} {} {}",
            clauses.where_clause, clauses.order_by, clauses.window
        );

        let mut stmt = sqlx::query_as::<_, LevelProgressRow>(&sql);
        if let Some(pattern) = &clauses.name_pattern {
            stmt = stmt.bind(pattern);
        }
        if let Some(keys) = &clauses.owner_keys {
            stmt = stmt.bind(keys);
        }
        stmt.bind(clauses.limit)
            .bind(clauses.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_owner_key(
        pool: &PgPool,
        owner_key: &str,
    ) -> Result<Option<LevelProgressRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM level_progress WHERE owner_key = $1");
        sqlx::query_as::<_, LevelProgressRow>(&sql)
            .bind(owner_key)
            .fetch_optional(pool)
            .await
    }
}
