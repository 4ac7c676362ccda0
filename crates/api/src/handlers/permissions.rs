//! Handlers for per-guild command permissions.
//!
//! Reads are public; every write requires [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rpgdash_core::error::CoreError;
use rpgdash_core::permissions::{
    normalize_command_name, validate_command_name, validate_description, validate_guild_id,
    validate_role_id, CommandPermission, GuildPermissions,
};
use rpgdash_db::models::permission::{CreateCommand, RoleGrant};
use rpgdash_db::repositories::PermissionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validated(check: Result<(), String>) -> AppResult<()> {
    check.map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}

/// Validate a role grant and return its normalized command name.
fn validate_grant(guild_id: &str, grant: &RoleGrant) -> AppResult<String> {
    validated(validate_guild_id(guild_id))?;
    let command_name = normalize_command_name(&grant.command_name);
    validated(validate_command_name(&command_name))?;
    validated(validate_role_id(&grant.role_id))?;
    Ok(command_name)
}

/// GET /api/v1/permissions/{guild_id}
pub async fn list_permissions(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> AppResult<Json<DataResponse<GuildPermissions>>> {
    validated(validate_guild_id(&guild_id))?;
    let permissions = PermissionRepo::list_for_guild(&state.pool, &guild_id)
        .await?
        .into_iter()
        .map(CommandPermission::from)
        .collect();

    Ok(Json(DataResponse {
        data: GuildPermissions {
            guild_id,
            permissions,
        },
    }))
}

/// POST /api/v1/permissions/{guild_id}
///
/// Allow a role to run a command. Granting twice is a no-op.
pub async fn add_role(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    Json(input): Json<RoleGrant>,
) -> AppResult<Json<DataResponse<CommandPermission>>> {
    let command_name = validate_grant(&guild_id, &input)?;
    let role_id = input.role_id.trim();

    let row = PermissionRepo::add_role(&state.pool, &guild_id, &command_name, role_id).await?;
    tracing::info!(guild_id, command_name, role_id, "Role granted on command");

    Ok(Json(DataResponse { data: row.into() }))
}

/// DELETE /api/v1/permissions/{guild_id}
///
/// Stop a role from running a command. Revoking an absent role is a no-op;
/// an unregistered command is a 404.
pub async fn remove_role(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    Json(input): Json<RoleGrant>,
) -> AppResult<Json<DataResponse<CommandPermission>>> {
    let command_name = validate_grant(&guild_id, &input)?;
    let role_id = input.role_id.trim();

    let row = PermissionRepo::remove_role(&state.pool, &guild_id, &command_name, role_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Command",
                key: command_name.clone(),
            })
        })?;
    tracing::info!(guild_id, command_name, role_id, "Role revoked on command");

    Ok(Json(DataResponse { data: row.into() }))
}

/// POST /api/v1/permissions/{guild_id}/command
///
/// Register a command with no roles. An existing name is a 409.
pub async fn create_command(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    Json(input): Json<CreateCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<CommandPermission>>)> {
    validated(validate_guild_id(&guild_id))?;
    let command_name = normalize_command_name(&input.command_name);
    validated(validate_command_name(&command_name))?;
    let description = input.description.as_deref().map(str::trim).unwrap_or("");
    validated(validate_description(description))?;

    let row =
        PermissionRepo::create_command(&state.pool, &guild_id, &command_name, description).await?;
    tracing::info!(guild_id, command_name, "Command registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: row.into() })))
}
