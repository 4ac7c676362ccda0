//! Repository for the `command_permissions` table.
//!
//! Role grants are idempotent: granting an existing role or revoking a
//! missing one leaves the row unchanged.

use sqlx::PgPool;

use crate::models::permission::CommandPermissionRow;

const COLUMNS: &str = "\
    id, guild_id, command_name, description, allowed_roles, created_at, updated_at";

pub struct PermissionRepo;

impl PermissionRepo {
    /// Every command registered for a guild, alphabetically.
    pub async fn list_for_guild(
        pool: &PgPool,
        guild_id: &str,
    ) -> Result<Vec<CommandPermissionRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM command_permissions \
             WHERE guild_id = $1 \
             ORDER BY command_name"
        );
        sqlx::query_as::<_, CommandPermissionRow>(&sql)
            .bind(guild_id)
            .fetch_all(pool)
            .await
    }

    /// Grant `role_id` on a command, creating the command row if needed.
    pub async fn add_role(
        pool: &PgPool,
        guild_id: &str,
        command_name: &str,
        role_id: &str,
    ) -> Result<CommandPermissionRow, sqlx::Error> {
        let sql = format!(
            "INSERT INTO command_permissions (guild_id, command_name, allowed_roles) \
             VALUES ($1, $2, ARRAY[$3]::TEXT[]) \
             ON CONFLICT (guild_id, command_name) DO UPDATE SET allowed_roles = \
                CASE WHEN $3 = ANY(command_permissions.allowed_roles) \
                     THEN command_permissions.allowed_roles \
                     ELSE array_append(command_permissions.allowed_roles, $3) \
                END \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommandPermissionRow>(&sql)
            .bind(guild_id)
            .bind(command_name)
            .bind(role_id)
            .fetch_one(pool)
            .await
    }

    /// Revoke `role_id` from a command. Returns `None` if the command is
    /// not registered.
    pub async fn remove_role(
        pool: &PgPool,
        guild_id: &str,
        command_name: &str,
        role_id: &str,
    ) -> Result<Option<CommandPermissionRow>, sqlx::Error> {
        let sql = format!(
            "UPDATE command_permissions \
             SET allowed_roles = array_remove(allowed_roles, $3) \
             WHERE guild_id = $1 AND command_name = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommandPermissionRow>(&sql)
            .bind(guild_id)
            .bind(command_name)
            .bind(role_id)
            .fetch_optional(pool)
            .await
    }

    /// Register a command with no roles. A duplicate name violates
    /// `uq_command_permissions_guild_command`.
    pub async fn create_command(
        pool: &PgPool,
        guild_id: &str,
        command_name: &str,
        description: &str,
    ) -> Result<CommandPermissionRow, sqlx::Error> {
        let sql = format!(
            "INSERT INTO command_permissions (guild_id, command_name, description) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommandPermissionRow>(&sql)
            .bind(guild_id)
            .bind(command_name)
            .bind(description)
            .fetch_one(pool)
            .await
    }
}
