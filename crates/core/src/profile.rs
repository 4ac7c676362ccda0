//! Profile queries: a single character with its equipment, inventory and
//! level progress, and a clan with its hydrated members.

use serde::Serialize;

use crate::character::Character;
use crate::clan::{build_profile, ClanProfile};
use crate::equipment::Equipment;
use crate::error::CoreResult;
use crate::inventory::Inventory;
use crate::progress::LevelProgress;
use crate::stats::{aggregate, AggregatedStats};
use crate::store::{CharacterLookup, EntityStore};
use crate::types::DbId;

/// A character together with the records keyed by its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterProfile {
    pub character: Character,
    /// `None` when the owner has never equipped anything.
    pub equipment: Option<Equipment>,
    pub inventory: Option<Inventory>,
    /// `None` when the owner has no tracked chat activity.
    pub level_progress: Option<LevelProgress>,
}

impl CharacterProfile {
    /// Base stats merged with equipment bonuses.
    pub fn stats(&self) -> AggregatedStats {
        aggregate(&self.character, self.equipment.as_ref())
    }
}

pub struct Profiles<'a> {
    store: &'a dyn EntityStore,
}

impl<'a> Profiles<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    /// Look a character up by owner key, then by numeric id.
    ///
    /// An unregistered player is `Ok(None)`, not an error.
    pub async fn character(&self, owner_key_or_id: &str) -> CoreResult<Option<CharacterProfile>> {
        let key = owner_key_or_id.trim();
        let mut character = self
            .store
            .find_character(&CharacterLookup::OwnerKey(key.to_string()))
            .await?;

        if character.is_none() {
            if let Ok(id) = key.parse::<DbId>() {
                character = self.store.find_character(&CharacterLookup::Id(id)).await?;
            }
        }

        let Some(character) = character else {
            tracing::debug!(key, "No character registered");
            return Ok(None);
        };

        let (equipment, inventory, level_progress) = tokio::try_join!(
            self.store.find_equipment(&character.owner_key),
            self.store.find_inventory(&character.owner_key),
            self.store.find_progress(&character.owner_key),
        )?;

        Ok(Some(CharacterProfile {
            character,
            equipment,
            inventory,
            level_progress,
        }))
    }

    /// A clan with members hydrated from their characters.
    pub async fn clan(&self, id: DbId) -> CoreResult<Option<ClanProfile>> {
        let Some(clan) = self.store.find_clan(id).await? else {
            return Ok(None);
        };

        let owner_keys = clan.member_owner_keys();
        let characters = if owner_keys.is_empty() {
            Vec::new()
        } else {
            self.store.find_characters_by_owner_keys(&owner_keys).await?
        };

        Ok(Some(build_profile(&clan, &characters)))
    }
}
