//! Repository for the `equipment` table.

use sqlx::PgPool;

use crate::models::equipment::EquipmentRow;

const COLUMNS: &str = "id, owner_key, slots, created_at, updated_at";

pub struct EquipmentRepo;

impl EquipmentRepo {
    pub async fn find_by_owner_key(
        pool: &PgPool,
        owner_key: &str,
    ) -> Result<Option<EquipmentRow>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM equipment WHERE owner_key = $1");
        sqlx::query_as::<_, EquipmentRow>(&sql)
            .bind(owner_key)
            .fetch_optional(pool)
            .await
    }
}
