//! PostgreSQL persistence for the RPG dashboard.
//!
//! - [`repositories`]: zero-sized repos, one per table, taking `&PgPool`.
//! - [`models`]: `FromRow` rows and their conversion into domain records.
//! - [`PgEntityStore`]: the [`rpgdash_core::EntityStore`] used in production.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod query;
pub mod repositories;
pub mod store;

pub use store::PgEntityStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
