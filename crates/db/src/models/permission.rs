//! Command permission row model and DTOs.

use rpgdash_core::permissions::CommandPermission;
use rpgdash_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `command_permissions` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommandPermissionRow {
    pub id: DbId,
    pub guild_id: String,
    pub command_name: String,
    pub description: String,
    pub allowed_roles: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommandPermissionRow> for CommandPermission {
    fn from(row: CommandPermissionRow) -> Self {
        CommandPermission {
            command_name: row.command_name,
            description: row.description,
            allowed_roles: row.allowed_roles,
        }
    }
}

/// DTO for granting or revoking a role on a command.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleGrant {
    pub command_name: String,
    pub role_id: String,
}

/// DTO for registering a new command.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommand {
    pub command_name: String,
    pub description: Option<String>,
}
