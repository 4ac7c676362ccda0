//! In-memory [`EntityStore`], used by tests and local fixtures.
//!
//! Records are held in plain vectors and every query is answered with the
//! same predicate and ordering helpers the engine relies on.

use async_trait::async_trait;

use crate::activity::ActivityEntry;
use crate::character::Character;
use crate::clan::Clan;
use crate::equipment::Equipment;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::market::{open_listings, MarketListing};
use crate::progress::LevelProgress;
use crate::store::{
    compare_records, name_matches, passes_filter, CharacterLookup, EntityStore, Field,
    FieldValue, RaceCount, Ranked, RecordQuery,
};
use crate::types::{DbId, OwnerKey, Timestamp};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    characters: Vec<Character>,
    equipment: Vec<Equipment>,
    inventories: Vec<Inventory>,
    progress: Vec<LevelProgress>,
    clans: Vec<Clan>,
    listings: Vec<MarketListing>,
    activity: Vec<ActivityEntry>,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every query fails, for exercising error paths.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_characters(mut self, characters: impl IntoIterator<Item = Character>) -> Self {
        self.characters
            .extend(characters.into_iter().map(Character::normalize));
        self
    }

    pub fn with_equipment(mut self, equipment: impl IntoIterator<Item = Equipment>) -> Self {
        self.equipment.extend(equipment);
        self
    }

    pub fn with_inventories(mut self, inventories: impl IntoIterator<Item = Inventory>) -> Self {
        self.inventories
            .extend(inventories.into_iter().map(Inventory::normalize));
        self
    }

    pub fn with_progress(mut self, progress: impl IntoIterator<Item = LevelProgress>) -> Self {
        self.progress
            .extend(progress.into_iter().map(LevelProgress::normalize));
        self
    }

    pub fn with_clans(mut self, clans: impl IntoIterator<Item = Clan>) -> Self {
        self.clans.extend(clans.into_iter().map(Clan::normalize));
        self
    }

    pub fn with_listings(mut self, listings: impl IntoIterator<Item = MarketListing>) -> Self {
        self.listings.extend(listings);
        self
    }

    pub fn with_activity(mut self, activity: impl IntoIterator<Item = ActivityEntry>) -> Self {
        self.activity.extend(activity);
        self
    }

    fn check(&self) -> CoreResult<()> {
        if self.unavailable {
            return Err(CoreError::StoreUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

/// Filter, search, sort and window `records` per `query`.
fn run_query<R: Ranked + Clone>(records: &[R], query: &RecordQuery) -> Vec<R> {
    let mut matched: Vec<&R> = records
        .iter()
        .filter(|r| passes_filter(*r, query.filter))
        .filter(|r| match &query.owner_keys {
            None => true,
            Some(keys) => match r.field(Field::OwnerKey) {
                Some(FieldValue::Text(owner)) => keys.iter().any(|k| k == owner),
                _ => false,
            },
        })
        .filter(|r| match &query.name_contains {
            None => true,
            Some(term) => name_matches(r.display_name(), term),
        })
        .collect();

    matched.sort_by(|a, b| compare_records(*a, *b, &query.sort));

    let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
    let limit = query
        .limit
        .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

    matched.into_iter().skip(skip).take(limit).cloned().collect()
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn find_characters(&self, query: &RecordQuery) -> CoreResult<Vec<Character>> {
        self.check()?;
        Ok(run_query(&self.characters, query))
    }

    async fn find_level_progress(&self, query: &RecordQuery) -> CoreResult<Vec<LevelProgress>> {
        self.check()?;
        Ok(run_query(&self.progress, query))
    }

    async fn find_clans(&self, query: &RecordQuery) -> CoreResult<Vec<Clan>> {
        self.check()?;
        Ok(run_query(&self.clans, query))
    }

    async fn count_characters_by_race(&self) -> CoreResult<Vec<RaceCount>> {
        self.check()?;
        let mut counts: Vec<RaceCount> = Vec::new();
        for character in &self.characters {
            match counts.iter_mut().find(|c| c.race == character.race) {
                Some(entry) => entry.count += 1,
                None => counts.push(RaceCount {
                    race: character.race.clone(),
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn find_characters_by_owner_keys(
        &self,
        owner_keys: &[OwnerKey],
    ) -> CoreResult<Vec<Character>> {
        self.check()?;
        Ok(self
            .characters
            .iter()
            .filter(|c| owner_keys.contains(&c.owner_key))
            .cloned()
            .collect())
    }

    async fn find_character(&self, lookup: &CharacterLookup) -> CoreResult<Option<Character>> {
        self.check()?;
        let found = match lookup {
            CharacterLookup::OwnerKey(key) => {
                self.characters.iter().find(|c| &c.owner_key == key)
            }
            CharacterLookup::Id(id) => self.characters.iter().find(|c| c.id == *id),
        };
        Ok(found.cloned())
    }

    async fn find_equipment(&self, owner_key: &str) -> CoreResult<Option<Equipment>> {
        self.check()?;
        Ok(self
            .equipment
            .iter()
            .find(|e| e.owner_key == owner_key)
            .cloned())
    }

    async fn find_inventory(&self, owner_key: &str) -> CoreResult<Option<Inventory>> {
        self.check()?;
        Ok(self
            .inventories
            .iter()
            .find(|i| i.owner_key == owner_key)
            .cloned())
    }

    async fn find_progress(&self, owner_key: &str) -> CoreResult<Option<LevelProgress>> {
        self.check()?;
        Ok(self
            .progress
            .iter()
            .find(|p| p.owner_key == owner_key)
            .cloned())
    }

    async fn find_clan(&self, id: DbId) -> CoreResult<Option<Clan>> {
        self.check()?;
        Ok(self.clans.iter().find(|c| c.id == id).cloned())
    }

    async fn find_open_listings(&self, now: Timestamp) -> CoreResult<Vec<MarketListing>> {
        self.check()?;
        Ok(open_listings(self.listings.clone(), now))
    }

    async fn recent_activity(&self, limit: u64) -> CoreResult<Vec<ActivityEntry>> {
        self.check()?;
        let mut entries = self.activity.clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(entries)
    }

    async fn count_characters(&self) -> CoreResult<i64> {
        self.check()?;
        Ok(i64::try_from(self.characters.len()).unwrap_or(i64::MAX))
    }
}
