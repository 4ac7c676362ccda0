//! Repository for the `inventories` table.

use sqlx::PgPool;

use crate::models::inventory::InventoryRow;

const COLUMNS: &str = "id, owner_key, items, created_at, updated_at";

pub struct InventoryRepo;

impl InventoryRepo {
    pub async fn find_by_owner_key(
        pool: &PgPool,
        owner_key: &str,
    ) -> Result<Option<InventoryRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM inventories WHERE owner_key = $1");
        sqlx::query_as::<_, InventoryRow>(&sql)
            .bind(owner_key)
            .fetch_optional(pool)
            .await
    }
}
