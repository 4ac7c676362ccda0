//! Category resolver: one static [`QueryPlan`] per ranking category.
//!
//! Every plan's sort list ends with a unique key (owner key or clan id) so
//! consecutive pages never overlap or skip records.

use crate::ranking::Category;
use crate::store::{Field, Filter, SortKey};

/// Record kind a plan reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Characters,
    LevelProgress,
    Clans,
    /// Character counts grouped by race rather than individual records.
    RaceDistribution,
}

/// Ranking work the store cannot do, performed in memory after fetching
/// every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFetch {
    /// Sort by [`crate::currency::Currency::total_value`], descending, then
    /// owner key.
    CurrencyTotal,
    /// Sort race groups by population, descending, then race key.
    PopulationCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPlan {
    pub category: Category,
    pub source: Source,
    pub filter: Filter,
    /// Store-side ordering. Empty when `post_fetch` does the ranking.
    pub sort: &'static [SortKey],
    pub post_fetch: Option<PostFetch>,
}

impl QueryPlan {
    /// Whether ranking needs the full candidate set in memory.
    pub fn ranks_in_memory(&self) -> bool {
        self.post_fetch.is_some()
    }
}

const COIN_FIELDS: &[Field] = &[Field::Platinum, Field::Gold, Field::Silver, Field::Bronze];

const fn character_plan(
    category: Category,
    filter: Filter,
    sort: &'static [SortKey],
) -> QueryPlan {
    QueryPlan {
        category,
        source: Source::Characters,
        filter,
        sort,
        post_fetch: None,
    }
}

const RPG: QueryPlan = character_plan(
    Category::Rpg,
    Filter::All,
    &[
        SortKey::desc(Field::Level),
        SortKey::desc(Field::Experience),
        SortKey::asc(Field::OwnerKey),
    ],
);

const GENERAL: QueryPlan = QueryPlan {
    category: Category::General,
    source: Source::LevelProgress,
    filter: Filter::All,
    sort: &[
        SortKey::desc(Field::Level),
        SortKey::desc(Field::Experience),
        SortKey::asc(Field::OwnerKey),
    ],
    post_fetch: None,
};

const MONEY: QueryPlan = QueryPlan {
    category: Category::Money,
    source: Source::Characters,
    filter: Filter::AnyPositive(COIN_FIELDS),
    sort: &[],
    post_fetch: Some(PostFetch::CurrencyTotal),
};

const BOUNTY: QueryPlan = character_plan(
    Category::Bounty,
    Filter::Positive(Field::Bounty),
    &[SortKey::desc(Field::Bounty), SortKey::asc(Field::OwnerKey)],
);

const RACE: QueryPlan = QueryPlan {
    category: Category::Race,
    source: Source::RaceDistribution,
    filter: Filter::All,
    sort: &[],
    post_fetch: Some(PostFetch::PopulationCount),
};

const PK: QueryPlan = character_plan(
    Category::Pk,
    Filter::Positive(Field::KilledPlayers),
    &[
        SortKey::desc(Field::KilledPlayers),
        SortKey::desc(Field::Bounty),
        SortKey::asc(Field::OwnerKey),
    ],
);

const RP: QueryPlan = character_plan(
    Category::Rp,
    Filter::Positive(Field::RpPoints),
    &[SortKey::desc(Field::RpPoints), SortKey::asc(Field::OwnerKey)],
);

const CLAN: QueryPlan = QueryPlan {
    category: Category::Clan,
    source: Source::Clans,
    filter: Filter::All,
    sort: &[
        SortKey::desc(Field::Points),
        SortKey::desc(Field::Level),
        SortKey::asc(Field::Id),
    ],
    post_fetch: None,
};

const GATHERER: QueryPlan = character_plan(
    Category::Gatherer,
    Filter::Positive(Field::ResourcesGathered),
    &[
        SortKey::desc(Field::ResourcesGathered),
        SortKey::asc(Field::OwnerKey),
    ],
);

const CRAFTER: QueryPlan = character_plan(
    Category::Crafter,
    Filter::Positive(Field::ItemsCrafted),
    &[SortKey::desc(Field::ItemsCrafted), SortKey::asc(Field::OwnerKey)],
);

const HEROES: QueryPlan = character_plan(
    Category::Heroes,
    Filter::Positive(Field::Reputation),
    &[SortKey::desc(Field::Reputation), SortKey::asc(Field::OwnerKey)],
);

// The only ascending primary sort: most negative reputation first.
const VILLAINS: QueryPlan = character_plan(
    Category::Villains,
    Filter::Negative(Field::Reputation),
    &[SortKey::asc(Field::Reputation), SortKey::asc(Field::OwnerKey)],
);

const HUNTER: QueryPlan = character_plan(
    Category::Hunter,
    Filter::Positive(Field::MonstersKilled),
    &[
        SortKey::desc(Field::MonstersKilled),
        SortKey::asc(Field::OwnerKey),
    ],
);

const BOSS: QueryPlan = character_plan(
    Category::Boss,
    Filter::Positive(Field::BossesKilled),
    &[SortKey::desc(Field::BossesKilled), SortKey::asc(Field::OwnerKey)],
);

/// The query plan for `category`.
pub fn resolve(category: Category) -> &'static QueryPlan {
    match category {
        Category::Rpg => &RPG,
        Category::General => &GENERAL,
        Category::Money => &MONEY,
        Category::Bounty => &BOUNTY,
        Category::Race => &RACE,
        Category::Pk => &PK,
        Category::Rp => &RP,
        Category::Clan => &CLAN,
        Category::Gatherer => &GATHERER,
        Category::Crafter => &CRAFTER,
        Category::Heroes => &HEROES,
        Category::Villains => &VILLAINS,
        Category::Hunter => &HUNTER,
        Category::Boss => &BOSS,
    }
}

/// Resolve a category by name. Unknown names resolve to `None`.
pub fn resolve_name(name: &str) -> Option<&'static QueryPlan> {
    Category::parse(name).map(resolve)
}
