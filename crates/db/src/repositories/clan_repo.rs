//! Repository for the `clans` and `clan_members` tables.

use rpgdash_core::store::RecordQuery;
use rpgdash_core::types::DbId;
use sqlx::PgPool;

use crate::models::clan::{ClanMemberRow, ClanRow};
use crate::query::{self, CLANS};

const CLAN_COLUMNS: &str = "\
    id, name, level, description, points, treasury, max_members, status, \
    created_at, updated_at";

const MEMBER_COLUMNS: &str = "\
    id, clan_id, owner_key, role, contribution, joined_at, created_at, updated_at";

pub struct ClanRepo;

impl ClanRepo {
    pub async fn find(pool: &PgPool, q: &RecordQuery) -> Result<Vec<ClanRow>, sqlx::Error> {
        let clauses = query::build(q, &CLANS);
        let sql = format!(
            "SELECT {CLAN_COLUMNS} FROM clans {} {} {}",
            clauses.where_clause, clauses.order_by, clauses.window
        );

        let mut stmt = sqlx::query_as::<_, ClanRow>(&sql);
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

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ClanRow>, sqlx::Error> {
        let sql = format!("SELECT {CLAN_COLUMNS} FROM clans WHERE id = $1");
        sqlx::query_as::<_, ClanRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Members of every clan in `clan_ids`, grouped by clan in join order.
    pub async fn members_for(
        pool: &PgPool,
        clan_ids: &[DbId],
    ) -> Result<Vec<ClanMemberRow>, sqlx::Error> {
        if clan_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM clan_members \
             WHERE clan_id = ANY($1) \
             ORDER BY clan_id, id"
        );
        sqlx::query_as::<_, ClanMemberRow>(&sql)
            .bind(clan_ids)
            .fetch_all(pool)
            .await
    }
}
