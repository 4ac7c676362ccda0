//! PostgreSQL implementation of [`EntityStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use rpgdash_core::activity::ActivityEntry;
use rpgdash_core::character::Character;
use rpgdash_core::clan::Clan;
use rpgdash_core::equipment::Equipment;
use rpgdash_core::inventory::Inventory;
use rpgdash_core::error::{CoreError, CoreResult};
use rpgdash_core::market::MarketListing;
use rpgdash_core::progress::LevelProgress;
use rpgdash_core::store::{CharacterLookup, EntityStore, RaceCount, RecordQuery};
use rpgdash_core::types::{DbId, OwnerKey, Timestamp};
use sqlx::PgPool;

use crate::models::clan::{ClanMemberRow, ClanRow};
use crate::models::market::BidRow;
use crate::repositories::{
    ActivityRepo, CharacterRepo, ClanRepo, EquipmentRepo, InventoryRepo, MarketRepo,
    ProgressRepo,
};

/// Entity store backed by the dashboard database.
#[derive(Clone)]
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Log a database failure and collapse it into the single store error.
fn unavailable(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |e| {
        tracing::error!(operation, error = %e, "Entity store query failed");
        CoreError::StoreUnavailable(operation.to_string())
    }
}

/// Attach each clan's members, preserving the order of `clans`.
fn assemble_clans(clans: Vec<ClanRow>, members: Vec<ClanMemberRow>) -> Vec<Clan> {
    let mut by_clan: HashMap<DbId, Vec<ClanMemberRow>> = HashMap::new();
    for member in members {
        by_clan.entry(member.clan_id).or_default().push(member);
    }
    clans
        .into_iter()
        .map(|clan| {
            let members = by_clan.remove(&clan.id).unwrap_or_default();
            clan.into_clan(members)
        })
        .collect()
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn find_characters(&self, query: &RecordQuery) -> CoreResult<Vec<Character>> {
        let rows = CharacterRepo::find(&self.pool, query)
            .await
            .map_err(unavailable("find_characters"))?;
        Ok(rows.into_iter().map(Character::from).collect())
    }

    async fn find_level_progress(&self, query: &RecordQuery) -> CoreResult<Vec<LevelProgress>> {
        let rows = ProgressRepo::find(&self.pool, query)
            .await
            .map_err(unavailable("find_level_progress"))?;
        Ok(rows.into_iter().map(LevelProgress::from).collect())
    }

    async fn find_clans(&self, query: &RecordQuery) -> CoreResult<Vec<Clan>> {
        let clans = ClanRepo::find(&self.pool, query)
            .await
            .map_err(unavailable("find_clans"))?;
        let ids: Vec<DbId> = clans.iter().map(|c| c.id).collect();
        let members = ClanRepo::members_for(&self.pool, &ids)
            .await
            .map_err(unavailable("find_clans"))?;
        Ok(assemble_clans(clans, members))
    }

    async fn count_characters_by_race(&self) -> CoreResult<Vec<RaceCount>> {
        let rows = CharacterRepo::count_by_race(&self.pool)
            .await
            .map_err(unavailable("count_characters_by_race"))?;
        Ok(rows
            .into_iter()
            .map(|r| RaceCount {
                race: r.race,
                count: r.count,
            })
            .collect())
    }

    async fn find_characters_by_owner_keys(
        &self,
        owner_keys: &[OwnerKey],
    ) -> CoreResult<Vec<Character>> {
        let rows = CharacterRepo::find_by_owner_keys(&self.pool, owner_keys)
            .await
            .map_err(unavailable("find_characters_by_owner_keys"))?;
        Ok(rows.into_iter().map(Character::from).collect())
    }

    async fn find_character(&self, lookup: &CharacterLookup) -> CoreResult<Option<Character>> {
        let row = match lookup {
            CharacterLookup::OwnerKey(key) => {
                CharacterRepo::find_by_owner_key(&self.pool, key).await
            }
            CharacterLookup::Id(id) => CharacterRepo::find_by_id(&self.pool, *id).await,
        }
        .map_err(unavailable("find_character"))?;
        Ok(row.map(Character::from))
    }

    async fn find_equipment(&self, owner_key: &str) -> CoreResult<Option<Equipment>> {
        let row = EquipmentRepo::find_by_owner_key(&self.pool, owner_key)
            .await
            .map_err(unavailable("find_equipment"))?;
        Ok(row.map(Equipment::from))
    }

    async fn find_inventory(&self, owner_key: &str) -> CoreResult<Option<Inventory>> {
        let row = InventoryRepo::find_by_owner_key(&self.pool, owner_key)
            .await
            .map_err(unavailable("find_inventory"))?;
        Ok(row.map(Inventory::from))
    }

    async fn find_progress(&self, owner_key: &str) -> CoreResult<Option<LevelProgress>> {
        let row = ProgressRepo::find_by_owner_key(&self.pool, owner_key)
            .await
            .map_err(unavailable("find_progress"))?;
        Ok(row.map(LevelProgress::from))
    }

    async fn find_clan(&self, id: DbId) -> CoreResult<Option<Clan>> {
        let Some(clan) = ClanRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable("find_clan"))?
        else {
            return Ok(None);
        };
        let members = ClanRepo::members_for(&self.pool, &[id])
            .await
            .map_err(unavailable("find_clan"))?;
        Ok(Some(clan.into_clan(members)))
    }

    async fn find_open_listings(&self, now: Timestamp) -> CoreResult<Vec<MarketListing>> {
        let listings = MarketRepo::list_open(&self.pool, now)
            .await
            .map_err(unavailable("find_open_listings"))?;
        let ids: Vec<DbId> = listings.iter().map(|l| l.id).collect();
        let bids = MarketRepo::bids_for(&self.pool, &ids)
            .await
            .map_err(unavailable("find_open_listings"))?;

        let mut by_listing: HashMap<DbId, Vec<BidRow>> = HashMap::new();
        for bid in bids {
            by_listing.entry(bid.listing_id).or_default().push(bid);
        }
        Ok(listings
            .into_iter()
            .map(|listing| {
                let bids = by_listing.remove(&listing.id).unwrap_or_default();
                listing.into_listing(bids)
            })
            .collect())
    }

    async fn recent_activity(&self, limit: u64) -> CoreResult<Vec<ActivityEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = ActivityRepo::recent(&self.pool, limit)
            .await
            .map_err(unavailable("recent_activity"))?;
        Ok(rows.into_iter().map(ActivityEntry::from).collect())
    }

    async fn count_characters(&self) -> CoreResult<i64> {
        CharacterRepo::count(&self.pool)
            .await
            .map_err(unavailable("count_characters"))
    }
}
