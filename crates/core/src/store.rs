//! Entity store seam.
//!
//! The ranking engine and profile queries only issue the queries described
//! here. The PostgreSQL implementation lives in `rpgdash-db`; an in-memory
//! implementation ([`crate::memory::InMemoryStore`]) backs tests.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::activity::ActivityEntry;
use crate::character::Character;
use crate::clan::Clan;
use crate::equipment::Equipment;
use crate::inventory::Inventory;
use crate::error::CoreResult;
use crate::market::MarketListing;
use crate::progress::LevelProgress;
use crate::types::{DbId, OwnerKey, Timestamp};

// ---------------------------------------------------------------------------
// Query vocabulary
// ---------------------------------------------------------------------------

/// A rankable field. Each record kind supports a subset; see [`Ranked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    OwnerKey,
    Level,
    Experience,
    Bounty,
    Reputation,
    KilledPlayers,
    RpPoints,
    MonstersKilled,
    ItemsCrafted,
    ResourcesGathered,
    BossesKilled,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Points,
}

/// A field value extracted for filtering or sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl FieldValue<'_> {
    fn as_int(self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(v),
            FieldValue::Text(_) => None,
        }
    }
}

/// Inclusion predicate applied before sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every record.
    All,
    /// `field > 0`.
    Positive(Field),
    /// `field < 0`.
    Negative(Field),
    /// At least one of the fields is `> 0`.
    AnyPositive(&'static [Field]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: Field,
    pub direction: Direction,
}

impl SortKey {
    pub const fn asc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub const fn desc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }
}

/// A filtered, sorted, paginated query over one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: Filter,
    /// Case-insensitive substring match on the display name.
    pub name_contains: Option<String>,
    /// Restrict to these owners (an empty set matches nothing).
    pub owner_keys: Option<Vec<OwnerKey>>,
    /// Sort keys in priority order. Empty means store order.
    pub sort: Vec<SortKey>,
    pub skip: u64,
    /// `None` fetches every matching record.
    pub limit: Option<u64>,
}

impl RecordQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            name_contains: None,
            owner_keys: None,
            sort: Vec::new(),
            skip: 0,
            limit: None,
        }
    }

    pub fn sorted_by(mut self, sort: &[SortKey]) -> Self {
        self.sort = sort.to_vec();
        self
    }

    pub fn name_contains(mut self, term: Option<&str>) -> Self {
        self.name_contains = term.map(str::to_string);
        self
    }

    pub fn owned_by(mut self, owner_keys: Vec<OwnerKey>) -> Self {
        self.owner_keys = Some(owner_keys);
        self
    }

    pub fn window(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }
}

/// How a single character is looked up for a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterLookup {
    OwnerKey(OwnerKey),
    Id(DbId),
}

/// Number of characters per stored race value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceCount {
    pub race: String,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Record field access
// ---------------------------------------------------------------------------

/// Field access shared by every rankable record kind.
pub trait Ranked {
    /// Value of `field`, or `None` when the kind does not carry it.
    fn field(&self, field: Field) -> Option<FieldValue<'_>>;

    /// Name matched by search terms.
    fn display_name(&self) -> &str;
}

impl Ranked for Character {
    fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        let value = match field {
            Field::Id => self.id,
            Field::OwnerKey => return Some(FieldValue::Text(&self.owner_key)),
            Field::Level => i64::from(self.level),
            Field::Experience => self.experience,
            Field::Bounty => self.bounty,
            Field::Reputation => self.reputation,
            Field::KilledPlayers => self.killed_players,
            Field::RpPoints => self.rp_points,
            Field::MonstersKilled => self.advancement.monsters_killed,
            Field::ItemsCrafted => self.advancement.items_crafted,
            Field::ResourcesGathered => self.advancement.resources_gathered,
            Field::BossesKilled => self.advancement.bosses_killed,
            Field::Platinum => self.currency.platinum,
            Field::Gold => self.currency.gold,
            Field::Silver => self.currency.silver,
            Field::Bronze => self.currency.bronze,
            Field::Points => return None,
        };
        Some(FieldValue::Int(value))
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Ranked for LevelProgress {
    fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::OwnerKey => Some(FieldValue::Text(&self.owner_key)),
            Field::Level => Some(FieldValue::Int(i64::from(self.level))),
            Field::Experience => Some(FieldValue::Int(self.xp)),
            _ => None,
        }
    }

    /// Level progress carries no name; searches go through characters.
    fn display_name(&self) -> &str {
        ""
    }
}

impl Ranked for Clan {
    fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Id => Some(FieldValue::Int(self.id)),
            Field::Level => Some(FieldValue::Int(i64::from(self.level))),
            Field::Points => Some(FieldValue::Int(self.stats.points)),
            _ => None,
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Predicate helpers
// ---------------------------------------------------------------------------

/// Case-insensitive substring match. An empty term matches everything.
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn int_field<R: Ranked>(record: &R, field: Field) -> Option<i64> {
    record.field(field).and_then(FieldValue::as_int)
}

/// Whether `record` passes `filter`. Fields the kind lacks never match.
pub fn passes_filter<R: Ranked>(record: &R, filter: Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Positive(field) => int_field(record, field).is_some_and(|v| v > 0),
        Filter::Negative(field) => int_field(record, field).is_some_and(|v| v < 0),
        Filter::AnyPositive(fields) => fields
            .iter()
            .any(|f| int_field(record, *f).is_some_and(|v| v > 0)),
    }
}

/// Compare two records by a list of sort keys.
pub fn compare_records<R: Ranked>(a: &R, b: &R, sort: &[SortKey]) -> Ordering {
    for key in sort {
        let ordering = a.field(key.field).cmp(&b.field(key.field));
        let ordering = match key.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Read access to the game's records.
///
/// Implementations apply [`Character::normalize`] and friends to every
/// record they return and map their own failures to
/// [`crate::error::CoreError::StoreUnavailable`].
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find_characters(&self, query: &RecordQuery) -> CoreResult<Vec<Character>>;

    async fn find_level_progress(&self, query: &RecordQuery) -> CoreResult<Vec<LevelProgress>>;

    async fn find_clans(&self, query: &RecordQuery) -> CoreResult<Vec<Clan>>;

    /// Character counts grouped by the stored race value, unordered.
    async fn count_characters_by_race(&self) -> CoreResult<Vec<RaceCount>>;

    async fn find_characters_by_owner_keys(
        &self,
        owner_keys: &[OwnerKey],
    ) -> CoreResult<Vec<Character>>;

    async fn find_character(&self, lookup: &CharacterLookup) -> CoreResult<Option<Character>>;

    async fn find_equipment(&self, owner_key: &str) -> CoreResult<Option<Equipment>>;

    async fn find_progress(&self, owner_key: &str) -> CoreResult<Option<LevelProgress>>;

    async fn find_inventory(&self, owner_key: &str) -> CoreResult<Option<Inventory>>;

    async fn find_clan(&self, id: DbId) -> CoreResult<Option<Clan>>;

    /// Active listings ending after `now`, soonest first.
    async fn find_open_listings(&self, now: Timestamp) -> CoreResult<Vec<MarketListing>>;

    /// Most recent activity entries, newest first.
    async fn recent_activity(&self, limit: u64) -> CoreResult<Vec<ActivityEntry>>;

    async fn count_characters(&self) -> CoreResult<i64>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
