//! Handlers for character and clan profiles.

use axum::extract::{Path, State};
use axum::Json;
use rpgdash_core::character::Character;
use rpgdash_core::clan::ClanProfile;
use rpgdash_core::equipment::Equipment;
use rpgdash_core::error::CoreError;
use rpgdash_core::inventory::Inventory;
use rpgdash_core::profile::Profiles;
use rpgdash_core::progress::LevelProgress;
use rpgdash_core::stats::AggregatedStats;
use rpgdash_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Character profile payload. Equipment, inventory and level progress are
/// always present; owners without records get empty slots, an empty bag
/// and level 1.
#[derive(Debug, Serialize)]
pub struct CharacterProfileResponse {
    pub character: Character,
    pub stats: AggregatedStats,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub level_progress: LevelProgress,
}

/// GET /api/v1/characters/{key}
///
/// `key` is an owner key, or a numeric character id as a fallback.
pub async fn get_character(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<CharacterProfileResponse>>> {
    let profile = Profiles::new(state.store.as_ref())
        .character(&key)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Character",
                key: key.clone(),
            })
        })?;

    let stats = profile.stats();
    let owner_key = profile.character.owner_key.clone();
    Ok(Json(DataResponse {
        data: CharacterProfileResponse {
            stats,
            equipment: profile
                .equipment
                .unwrap_or_else(|| Equipment::empty(owner_key.clone())),
            inventory: profile
                .inventory
                .unwrap_or_else(|| Inventory::empty(owner_key.clone())),
            level_progress: profile
                .level_progress
                .unwrap_or_else(|| LevelProgress::initial(owner_key)),
            character: profile.character,
        },
    }))
}

/// GET /api/v1/clans/{id}
pub async fn get_clan(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClanProfile>>> {
    let clan = Profiles::new(state.store.as_ref())
        .clan(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Clan",
            key: id.to_string(),
        }))?;

    Ok(Json(DataResponse { data: clan }))
}
