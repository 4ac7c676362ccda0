//! Leaderboard engine.
//!
//! Runs a category's [`QueryPlan`] against an [`EntityStore`] and returns a
//! single page. Every call is independently parameterized; the engine keeps
//! no state between requests.

use std::collections::HashMap;

use serde::Serialize;

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::races::{self, UNKNOWN_RACE_EMOJI};
use crate::ranking::plan::{resolve, PostFetch, QueryPlan, Source};
use crate::ranking::rows::{self, LeaderboardRow, RaceRow};
use crate::ranking::Category;
use crate::store::{EntityStore, Filter, RecordQuery};

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page request. Both values must be at least 1.
    pub fn new(page: u64, page_size: u64) -> CoreResult<Self> {
        if page == 0 {
            return Err(CoreError::Validation("page must be at least 1".to_string()));
        }
        if page_size == 0 {
            return Err(CoreError::Validation(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self { page, page_size })
    }

    /// Number of records before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Slice an already-ranked, in-memory list down to this page, paired
    /// with each item's absolute rank.
    fn slice<T>(&self, ranked: Vec<T>) -> Vec<(u64, T)> {
        let skip = self.skip();
        ranked
            .into_iter()
            .zip(1u64..)
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.page_size).unwrap_or(usize::MAX))
            .map(|(item, rank)| (rank, item))
            .collect()
    }

    /// Absolute rank of the `index`-th row on this page.
    fn rank_at(&self, index: usize) -> u64 {
        self.skip() + index as u64 + 1
    }
}

/// One page of a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardPage {
    /// Canonical category name, or the requested name when unknown.
    pub category: String,
    pub page: u64,
    pub page_size: u64,
    /// `true` when the page came back full. Under-reports nothing but can
    /// over-report by one empty page when the total is a multiple of the
    /// page size.
    pub has_more: bool,
    pub rows: Vec<LeaderboardRow>,
}

impl LeaderboardPage {
    fn new(category: String, request: PageRequest, rows: Vec<LeaderboardRow>) -> Self {
        let has_more = rows.len() as u64 == request.page_size;
        Self {
            category,
            page: request.page,
            page_size: request.page_size,
            has_more,
            rows,
        }
    }
}

/// Trim a search term; blank terms mean no search.
fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Read-only leaderboard queries over an entity store.
pub struct Leaderboard<'a> {
    store: &'a dyn EntityStore,
}

impl<'a> Leaderboard<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    /// List one page of `category`.
    ///
    /// Unknown categories return an empty page. Store failures propagate as
    /// [`CoreError::StoreUnavailable`] with nothing partial returned.
    pub async fn list(
        &self,
        category: &str,
        request: PageRequest,
        search: Option<&str>,
    ) -> CoreResult<LeaderboardPage> {
        let search = search_term(search);

        let Some(category) = Category::parse(category) else {
            tracing::debug!(category, "Unknown leaderboard category, returning empty page");
            return Ok(LeaderboardPage::new(
                category.trim().to_string(),
                request,
                Vec::new(),
            ));
        };

        tracing::debug!(
            category = %category,
            page = request.page,
            page_size = request.page_size,
            search = search.unwrap_or(""),
            "Listing leaderboard"
        );

        let plan = resolve(category);
        let rows = match (plan.source, plan.post_fetch) {
            (Source::Characters, Some(PostFetch::CurrencyTotal)) => {
                self.rank_by_wealth(plan, request, search).await?
            }
            (Source::Characters, _) => self.rank_characters(plan, request, search).await?,
            (Source::LevelProgress, _) => self.rank_level_progress(plan, request, search).await?,
            (Source::Clans, _) => self.rank_clans(plan, request, search).await?,
            (Source::RaceDistribution, _) => self.rank_races(request, search).await?,
        };

        Ok(LeaderboardPage::new(
            category.as_str().to_string(),
            request,
            rows,
        ))
    }

    async fn rank_characters(
        &self,
        plan: &QueryPlan,
        request: PageRequest,
        search: Option<&str>,
    ) -> CoreResult<Vec<LeaderboardRow>> {
        let query = RecordQuery::new(plan.filter)
            .name_contains(search)
            .sorted_by(plan.sort)
            .window(request.skip(), request.page_size);

        let characters = self.store.find_characters(&query).await?;
        Ok(characters
            .iter()
            .enumerate()
            .map(|(i, c)| rows::character_row(plan.category, request.rank_at(i), c))
            .collect())
    }

    /// Money cannot be sorted by the store: fetch every candidate, rank by
    /// total value, then slice.
    async fn rank_by_wealth(
        &self,
        plan: &QueryPlan,
        request: PageRequest,
        search: Option<&str>,
    ) -> CoreResult<Vec<LeaderboardRow>> {
        let query = RecordQuery::new(plan.filter).name_contains(search);
        let mut candidates: Vec<(i64, Character)> = self
            .store
            .find_characters(&query)
            .await?
            .into_iter()
            .map(|c| (c.currency.total_value(), c))
            .collect();

        candidates.sort_by(|(a_total, a), (b_total, b)| {
            b_total.cmp(a_total).then_with(|| a.owner_key.cmp(&b.owner_key))
        });

        Ok(request
            .slice(candidates)
            .into_iter()
            .map(|(rank, (_, c))| rows::character_row(plan.category, rank, &c))
            .collect())
    }

    /// Level progress carries no name, so a name search first resolves
    /// matching characters to owner keys.
    async fn rank_level_progress(
        &self,
        plan: &QueryPlan,
        request: PageRequest,
        search: Option<&str>,
    ) -> CoreResult<Vec<LeaderboardRow>> {
        let mut query = RecordQuery::new(plan.filter)
            .sorted_by(plan.sort)
            .window(request.skip(), request.page_size);

        if let Some(term) = search {
            let matching = self
                .store
                .find_characters(&RecordQuery::new(Filter::All).name_contains(Some(term)))
                .await?;
            if matching.is_empty() {
                return Ok(Vec::new());
            }
            query = query.owned_by(matching.into_iter().map(|c| c.owner_key).collect());
        }

        let progress = self.store.find_level_progress(&query).await?;
        if progress.is_empty() {
            return Ok(Vec::new());
        }

        let owner_keys: Vec<_> = progress.iter().map(|p| p.owner_key.clone()).collect();
        let characters = self.store.find_characters_by_owner_keys(&owner_keys).await?;
        let by_owner: HashMap<&str, &Character> = characters
            .iter()
            .map(|c| (c.owner_key.as_str(), c))
            .collect();

        Ok(progress
            .iter()
            .enumerate()
            .map(|(i, p)| {
                rows::general_row(
                    request.rank_at(i),
                    p,
                    by_owner.get(p.owner_key.as_str()).copied(),
                )
            })
            .collect())
    }

    async fn rank_clans(
        &self,
        plan: &QueryPlan,
        request: PageRequest,
        search: Option<&str>,
    ) -> CoreResult<Vec<LeaderboardRow>> {
        let query = RecordQuery::new(plan.filter)
            .name_contains(search)
            .sorted_by(plan.sort)
            .window(request.skip(), request.page_size);

        let clans = self.store.find_clans(&query).await?;
        Ok(clans
            .iter()
            .enumerate()
            .map(|(i, clan)| rows::clan_row(request.rank_at(i), clan))
            .collect())
    }

    /// Population per race. Stored values are merged by canonical key so
    /// `"Dark Elf"` and `"darkelf"` count together.
    async fn rank_races(
        &self,
        request: PageRequest,
        search: Option<&str>,
    ) -> CoreResult<Vec<LeaderboardRow>> {
        let counts = self.store.count_characters_by_race().await?;

        let mut groups: HashMap<String, RaceGroup> = HashMap::new();
        for entry in counts {
            let key = races::race_key(&entry.race);
            let raw = entry.race.trim().to_string();
            groups
                .entry(key)
                .and_modify(|g| {
                    g.count += entry.count;
                    if raw < g.raw {
                        g.raw = raw.clone();
                    }
                })
                .or_insert(RaceGroup {
                    raw,
                    count: entry.count,
                });
        }

        let mut ranked: Vec<RaceRow> = groups
            .into_iter()
            .map(|(key, group)| race_row(&key, group))
            .filter(|row| match search {
                None => true,
                Some(term) => {
                    crate::store::name_matches(&row.display_name, term)
                        || crate::store::name_matches(&row.race, term)
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.race.cmp(&b.race)));

        Ok(request
            .slice(ranked)
            .into_iter()
            .map(|(rank, row)| LeaderboardRow::Race(RaceRow { rank, ..row }))
            .collect())
    }
}

struct RaceGroup {
    /// Smallest stored spelling, used for races outside the table.
    raw: String,
    count: i64,
}

fn race_row(key: &str, group: RaceGroup) -> RaceRow {
    match races::lookup(key) {
        Some(info) => RaceRow {
            rank: 0,
            race: info.key.to_string(),
            display_name: info.name.to_string(),
            emoji: info.emoji.to_string(),
            tier: Some(info.tier.to_string()),
            count: group.count,
        },
        None => RaceRow {
            rank: 0,
            race: group.raw.clone(),
            display_name: group.raw,
            emoji: UNKNOWN_RACE_EMOJI.to_string(),
            tier: None,
            count: group.count,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;

    use super::*;
    use crate::clan::{Clan, ClanMember, ClanStats};
    use crate::currency::Currency;
    use crate::memory::InMemoryStore;
    use crate::progress::LevelProgress;

    fn character(owner_key: &str) -> Character {
        Character {
            owner_key: owner_key.into(),
            name: format!("Hero {owner_key}"),
            ..Character::default()
        }
    }

    fn page(page: u64, size: u64) -> PageRequest {
        PageRequest::new(page, size).unwrap()
    }

    fn owners(page: &LeaderboardPage) -> Vec<String> {
        page.rows
            .iter()
            .filter_map(|r| r.owner_key().map(str::to_string))
            .collect()
    }

    /// Twenty-five characters with every ranked field populated, several
    /// of them tied.
    fn populated_store() -> InMemoryStore {
        let characters = (1..=25).map(|i: i64| {
            let mut c = character(&format!("{i:03}"));
            c.level = (i % 5 + 1) as i32;
            c.experience = i % 3;
            c.bounty = i % 4;
            c.reputation = i % 7 - 3;
            c.killed_players = i % 3;
            c.rp_points = i % 6;
            c.race = ["human", "Elf", "dark elf", "orc"][(i % 4) as usize].to_string();
            c.currency = Currency {
                gold: i % 5,
                ..Currency::default()
            };
            c.advancement.monsters_killed = i % 2;
            c.advancement.items_crafted = i % 3;
            c.advancement.resources_gathered = i % 4;
            c.advancement.bosses_killed = i % 5;
            c
        });
        let progress = (1..=25).map(|i: i64| LevelProgress {
            owner_key: format!("{i:03}"),
            level: (i % 4 + 1) as i32,
            xp: i % 2,
        });
        let clans = (1..=25).map(|i: i64| Clan {
            id: i,
            name: format!("Clan {i}"),
            level: (i % 3 + 1) as i32,
            stats: ClanStats { points: i % 4 },
            ..Clan::default()
        });
        InMemoryStore::new()
            .with_characters(characters)
            .with_progress(progress)
            .with_clans(clans)
    }

    fn row_key(row: &LeaderboardRow) -> String {
        match row {
            LeaderboardRow::Race(r) => r.race.clone(),
            LeaderboardRow::Clan(r) => r.clan_id.to_string(),
            other => other.owner_key().unwrap_or_default().to_string(),
        }
    }

    #[tokio::test]
    async fn pages_never_exceed_size_or_repeat_keys() {
        let store = populated_store();
        let board = Leaderboard::new(&store);

        for category in Category::ALL {
            let mut seen = HashSet::new();
            for n in 1..=8 {
                let result = board.list(category.as_str(), page(n, 4), None).await.unwrap();
                assert!(result.rows.len() <= 4, "{category} page {n}");
                for row in &result.rows {
                    assert!(seen.insert(row_key(row)), "{category} repeated {}", row_key(row));
                }
            }
        }
    }

    #[tokio::test]
    async fn repeated_calls_return_identical_pages() {
        let store = populated_store();
        let board = Leaderboard::new(&store);
        for category in Category::ALL {
            let first = board.list(category.as_str(), page(2, 5), None).await.unwrap();
            let second = board.list(category.as_str(), page(2, 5), None).await.unwrap();
            assert_eq!(first, second, "{category}");
        }
    }

    #[tokio::test]
    async fn money_ranks_by_converted_total() {
        let mut gold = character("gold");
        gold.currency.gold = 10;
        let mut platinum = character("platinum");
        platinum.currency.platinum = 1;
        let mut silver = character("silver");
        silver.currency.silver = 999;
        let broke = character("broke");

        for order in [
            vec![gold.clone(), platinum.clone(), silver.clone(), broke.clone()],
            vec![silver.clone(), broke.clone(), gold.clone(), platinum.clone()],
        ] {
            let store = InMemoryStore::new().with_characters(order);
            let result = Leaderboard::new(&store)
                .list("money", page(1, 10), None)
                .await
                .unwrap();
            assert_eq!(owners(&result), vec!["platinum", "gold", "silver"]);
        }
    }

    #[tokio::test]
    async fn money_pages_slice_the_fully_ranked_set() {
        // Store order is the reverse of wealth order.
        let characters = (1..=6).map(|i: i64| {
            let mut c = character(&i.to_string());
            c.currency.bronze = 100 - i;
            c
        });
        let store = InMemoryStore::new().with_characters(characters);
        let result = Leaderboard::new(&store)
            .list("money", page(2, 2), None)
            .await
            .unwrap();
        assert_eq!(owners(&result), vec!["3", "4"]);
        assert_eq!(result.rows[0].rank(), 3);
    }

    #[tokio::test]
    async fn villains_sort_most_negative_first() {
        let characters = [("a", -50), ("b", -10), ("c", 5), ("d", -100)].map(|(key, rep)| {
            let mut c = character(key);
            c.reputation = rep;
            c
        });
        let store = InMemoryStore::new().with_characters(characters);
        let result = Leaderboard::new(&store)
            .list("villains", page(1, 10), None)
            .await
            .unwrap();
        assert_eq!(owners(&result), vec!["d", "a", "b"]);
    }

    #[tokio::test]
    async fn heroes_exclude_non_positive_reputation() {
        let characters = [("a", 0), ("b", 10), ("c", -5), ("d", 30)].map(|(key, rep)| {
            let mut c = character(key);
            c.reputation = rep;
            c
        });
        let store = InMemoryStore::new().with_characters(characters);
        let result = Leaderboard::new(&store)
            .list("heroes", page(1, 10), None)
            .await
            .unwrap();
        assert_eq!(owners(&result), vec!["d", "b"]);
    }

    #[tokio::test]
    async fn general_search_resolves_names_to_owner_keys() {
        let mut aria = character("1");
        aria.name = "Lady ARIA".into();
        let mut brak = character("2");
        brak.name = "Brak".into();
        let store = InMemoryStore::new()
            .with_characters([aria, brak])
            .with_progress([
                LevelProgress { owner_key: "1".into(), level: 3, xp: 0 },
                LevelProgress { owner_key: "2".into(), level: 9, xp: 0 },
                LevelProgress { owner_key: "3".into(), level: 5, xp: 0 },
            ]);
        let board = Leaderboard::new(&store);

        let searched = board.list("general", page(1, 10), Some("aria")).await.unwrap();
        assert_eq!(owners(&searched), vec!["1"]);

        let all = board.list("general", page(1, 10), None).await.unwrap();
        assert_eq!(owners(&all), vec!["2", "3", "1"]);
        let LeaderboardRow::General(orphan) = &all.rows[1] else {
            panic!("expected a general row");
        };
        assert_eq!(orphan.name, rows::UNKNOWN_USER);
        assert!(!orphan.has_character);
    }

    #[tokio::test]
    async fn general_search_without_matches_is_empty() {
        let store = InMemoryStore::new().with_progress([LevelProgress::initial("1")]);
        let result = Leaderboard::new(&store)
            .list("general", page(1, 10), Some("nobody"))
            .await
            .unwrap();
        assert!(result.rows.is_empty());
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn race_counts_population_descending() {
        let characters = [("1", "human"), ("2", "human"), ("3", "elf")].map(|(key, race)| {
            let mut c = character(key);
            c.race = race.into();
            c
        });
        let store = InMemoryStore::new().with_characters(characters);
        let result = Leaderboard::new(&store)
            .list("race", page(1, 10), None)
            .await
            .unwrap();

        let counts: Vec<(String, i64)> = result
            .rows
            .iter()
            .map(|r| match r {
                LeaderboardRow::Race(r) => (r.race.clone(), r.count),
                other => panic!("unexpected row {other:?}"),
            })
            .collect();
        assert_eq!(counts, vec![("human".to_string(), 2), ("elf".to_string(), 1)]);
    }

    #[tokio::test]
    async fn race_merges_spellings_and_keeps_unknown_keys() {
        let characters = [("1", "Dark Elf"), ("2", "darkelf"), ("3", "Lizardfolk")].map(
            |(key, race)| {
                let mut c = character(key);
                c.race = race.into();
                c
            },
        );
        let store = InMemoryStore::new().with_characters(characters);
        let result = Leaderboard::new(&store)
            .list("race", page(1, 10), None)
            .await
            .unwrap();

        let LeaderboardRow::Race(dark_elf) = &result.rows[0] else {
            panic!("expected a race row");
        };
        assert_eq!(dark_elf.race, "darkelf");
        assert_eq!(dark_elf.display_name, "Dark Elf");
        assert_eq!(dark_elf.count, 2);

        let LeaderboardRow::Race(unknown) = &result.rows[1] else {
            panic!("expected a race row");
        };
        assert_eq!(unknown.race, "Lizardfolk");
        assert_eq!(unknown.emoji, UNKNOWN_RACE_EMOJI);
        assert_eq!(unknown.tier, None);
    }

    #[tokio::test]
    async fn full_page_reports_more_and_short_page_does_not() {
        let store =
            InMemoryStore::new().with_characters((1..=20).map(|i: i64| character(&format!("{i:02}"))));
        let board = Leaderboard::new(&store);

        let second = board.list("rpg", page(2, 10), None).await.unwrap();
        assert_eq!(second.rows.len(), 10);
        assert!(second.has_more);

        let third = board.list("rpg", page(3, 10), None).await.unwrap();
        assert!(third.rows.is_empty());
        assert!(!third.has_more);
    }

    #[tokio::test]
    async fn exact_multiple_over_reports_one_page() {
        let store =
            InMemoryStore::new().with_characters((1..=10).map(|i: i64| character(&i.to_string())));
        let first = Leaderboard::new(&store)
            .list("rpg", page(1, 10), None)
            .await
            .unwrap();
        assert!(first.has_more);
    }

    #[tokio::test]
    async fn unknown_category_is_an_empty_page() {
        let store = populated_store();
        let result = Leaderboard::new(&store)
            .list("richest", page(1, 10), None)
            .await
            .unwrap();
        assert!(result.rows.is_empty());
        assert!(!result.has_more);
        assert_eq!(result.category, "richest");
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_trimmed() {
        let mut aria = character("1");
        aria.name = "Aria Stormborn".into();
        aria.bounty = 10;
        let mut brak = character("2");
        brak.bounty = 20;
        let store = InMemoryStore::new().with_characters([aria, brak]);
        let result = Leaderboard::new(&store)
            .list("bounty", page(1, 10), Some("  STORM "))
            .await
            .unwrap();
        assert_eq!(owners(&result), vec!["1"]);
    }

    #[tokio::test]
    async fn clan_rows_carry_member_count_and_leader() {
        let clan = Clan {
            id: 7,
            name: "Iron Wolves".into(),
            stats: ClanStats { points: 40 },
            members: vec![
                ClanMember {
                    owner_key: "1".into(),
                    role: "Member".into(),
                    ..ClanMember::default()
                },
                ClanMember {
                    owner_key: "2".into(),
                    role: "Leader".into(),
                    ..ClanMember::default()
                },
            ],
            ..Clan::default()
        };
        let store = InMemoryStore::new().with_clans([clan]);
        let result = Leaderboard::new(&store)
            .list("clan", page(1, 10), None)
            .await
            .unwrap();
        let LeaderboardRow::Clan(row) = &result.rows[0] else {
            panic!("expected a clan row");
        };
        assert_eq!(row.member_count, 2);
        assert_eq!(row.leader_owner_key.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = InMemoryStore::unavailable();
        let err = Leaderboard::new(&store)
            .list("rpg", page(1, 10), None)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::StoreUnavailable(_));
    }

    #[test]
    fn page_request_rejects_zero() {
        assert_matches!(PageRequest::new(0, 10), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::new(1, 0), Err(CoreError::Validation(_)));
        assert_eq!(page(3, 10).skip(), 20);
    }
}
