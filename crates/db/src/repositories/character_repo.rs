//! Repository for the `characters` table.

use rpgdash_core::store::RecordQuery;
use rpgdash_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{CharacterRow, RaceCountRow};
use crate::query::{self, CHARACTERS};

/// Column list for `characters` queries.
const COLUMNS: &str = "\
    id, owner_key, name, race, job, level, experience, stats, \
    platinum, gold, silver, bronze, reputation, bounty, killed_players, rp_points, \
    monsters_killed, items_crafted, resources_gathered, bosses_killed, \
    title, guild, description, emoji, created_at, updated_at";

/// Read access to player characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Run a ranking query: filter, name search, owner restriction, sort
    /// and window.
    pub async fn find(pool: &PgPool, q: &RecordQuery) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let clauses = query::build(q, &CHARACTERS);
        let sql = format!(
            "SELECT {COLUMNS} FROM characters {} {} {}",
            clauses.where_clause, clauses.order_by, clauses.window
        );

        let mut stmt = sqlx::query_as::<_, CharacterRow>(&sql);
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

    /// Characters whose owner key is in `owner_keys`, in no particular order.
    pub async fn find_by_owner_keys(
        pool: &PgPool,
        owner_keys: &[String],
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        if owner_keys.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {COLUMNS} FROM characters WHERE owner_key = ANY($1)");
        sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(owner_keys)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_owner_key(
        pool: &PgPool,
        owner_key: &str,
    ) -> Result<Option<CharacterRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM characters WHERE owner_key = $1");
        sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(owner_key)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CharacterRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count characters per stored race. Blank or missing races are
    /// counted as `human`; spelling variants are merged by the caller.
    pub async fn count_by_race(pool: &PgPool) -> Result<Vec<RaceCountRow>, sqlx::Error> {
        sqlx::query_as::<_, RaceCountRow>(
            "SELECT COALESCE(NULLIF(TRIM(race), ''), 'human') AS race, COUNT(*) AS count \
             FROM characters \
             GROUP BY 1",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM characters")
            .fetch_one(pool)
            .await
    }
}
