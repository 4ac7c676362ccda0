//! Per-category leaderboard rows.
//!
//! Each category has its own row shape carrying only the fields its board
//! displays. `rank` is the absolute 1-based position across all pages.

use serde::Serialize;

use crate::character::Character;
use crate::clan::Clan;
use crate::currency::Currency;
use crate::progress::LevelProgress;
use crate::ranking::Category;
use crate::types::{DbId, OwnerKey};

/// Name shown for level-progress entries whose owner has no character.
pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeaderboardRow {
    Rpg(RpgRow),
    General(GeneralRow),
    Money(MoneyRow),
    Bounty(BountyRow),
    Race(RaceRow),
    Pk(PkRow),
    Rp(RpRow),
    Clan(ClanRow),
    /// Gatherer, crafter, hunter and boss boards.
    Milestone(MilestoneRow),
    /// Heroes and villains boards.
    Reputation(ReputationRow),
}

impl LeaderboardRow {
    pub fn rank(&self) -> u64 {
        match self {
            LeaderboardRow::Rpg(r) => r.rank,
            LeaderboardRow::General(r) => r.rank,
            LeaderboardRow::Money(r) => r.rank,
            LeaderboardRow::Bounty(r) => r.rank,
            LeaderboardRow::Race(r) => r.rank,
            LeaderboardRow::Pk(r) => r.rank,
            LeaderboardRow::Rp(r) => r.rank,
            LeaderboardRow::Clan(r) => r.rank,
            LeaderboardRow::Milestone(r) => r.rank,
            LeaderboardRow::Reputation(r) => r.rank,
        }
    }

    /// The ranked character, for rows about a single character.
    pub fn character(&self) -> Option<&CharacterSummary> {
        match self {
            LeaderboardRow::Rpg(r) => Some(&r.character),
            LeaderboardRow::Money(r) => Some(&r.character),
            LeaderboardRow::Bounty(r) => Some(&r.character),
            LeaderboardRow::Pk(r) => Some(&r.character),
            LeaderboardRow::Rp(r) => Some(&r.character),
            LeaderboardRow::Milestone(r) => Some(&r.character),
            LeaderboardRow::Reputation(r) => Some(&r.character),
            LeaderboardRow::General(_) | LeaderboardRow::Race(_) | LeaderboardRow::Clan(_) => None,
        }
    }

    /// Owner key of the ranked player, if the row is about one.
    pub fn owner_key(&self) -> Option<&str> {
        match self {
            LeaderboardRow::General(r) => Some(&r.owner_key),
            other => other.character().map(|c| c.owner_key.as_str()),
        }
    }
}

/// Display fields shared by every character-sourced row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSummary {
    pub owner_key: OwnerKey,
    pub name: String,
    pub race: String,
    pub job: String,
    pub level: i32,
    pub title: Option<String>,
    pub emoji: Option<String>,
}

impl From<&Character> for CharacterSummary {
    fn from(c: &Character) -> Self {
        Self {
            owner_key: c.owner_key.clone(),
            name: c.name.clone(),
            race: c.race.clone(),
            job: c.job.clone(),
            level: c.level,
            title: c.title.clone(),
            emoji: c.emoji.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpgRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    pub experience: i64,
    pub attack: i64,
    pub defense: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralRow {
    pub rank: u64,
    pub owner_key: OwnerKey,
    pub name: String,
    pub race: Option<String>,
    pub job: Option<String>,
    pub emoji: Option<String>,
    pub level: i32,
    pub xp: i64,
    pub has_character: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    pub currency: Currency,
    /// Wealth in bronze.
    pub total_value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BountyRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    pub bounty: i64,
    pub killed_players: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceRow {
    pub rank: u64,
    /// Canonical race key, or the stored value for races outside the table.
    pub race: String,
    pub display_name: String,
    pub emoji: String,
    pub tier: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PkRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    pub killed_players: i64,
    pub bounty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    pub rp_points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClanRow {
    pub rank: u64,
    pub clan_id: DbId,
    pub name: String,
    pub level: i32,
    pub points: i64,
    pub member_count: usize,
    pub leader_owner_key: Option<OwnerKey>,
}

/// Which advancement counter a milestone row ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    ResourcesGathered,
    ItemsCrafted,
    MonstersKilled,
    BossesKilled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    pub milestone: Milestone,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationRow {
    pub rank: u64,
    #[serde(flatten)]
    pub character: CharacterSummary,
    /// Positive on the heroes board, negative on the villains board.
    pub reputation: i64,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Build the row for a character ranked on a character-sourced board.
///
/// `General`, `Race` and `Clan` have dedicated constructors; passing one of
/// them here yields the plain level row.
pub fn character_row(category: Category, rank: u64, c: &Character) -> LeaderboardRow {
    let milestone = |milestone, count| {
        LeaderboardRow::Milestone(MilestoneRow {
            rank,
            character: CharacterSummary::from(c),
            milestone,
            count,
        })
    };
    let character = CharacterSummary::from(c);

    match category {
        Category::Money => LeaderboardRow::Money(MoneyRow {
            rank,
            currency: c.currency,
            total_value: c.currency.total_value(),
            character,
        }),
        Category::Bounty => LeaderboardRow::Bounty(BountyRow {
            rank,
            bounty: c.bounty,
            killed_players: c.killed_players,
            character,
        }),
        Category::Pk => LeaderboardRow::Pk(PkRow {
            rank,
            killed_players: c.killed_players,
            bounty: c.bounty,
            character,
        }),
        Category::Rp => LeaderboardRow::Rp(RpRow {
            rank,
            rp_points: c.rp_points,
            character,
        }),
        Category::Gatherer => {
            milestone(Milestone::ResourcesGathered, c.advancement.resources_gathered)
        }
        Category::Crafter => milestone(Milestone::ItemsCrafted, c.advancement.items_crafted),
        Category::Hunter => milestone(Milestone::MonstersKilled, c.advancement.monsters_killed),
        Category::Boss => milestone(Milestone::BossesKilled, c.advancement.bosses_killed),
        Category::Heroes | Category::Villains => LeaderboardRow::Reputation(ReputationRow {
            rank,
            reputation: c.reputation,
            character,
        }),
        Category::Rpg | Category::General | Category::Race | Category::Clan => {
            LeaderboardRow::Rpg(RpgRow {
                rank,
                experience: c.experience,
                attack: c.stats.attack,
                defense: c.stats.defense,
                character,
            })
        }
    }
}

/// Level-progress row, hydrated with the owner's character when one exists.
pub fn general_row(
    rank: u64,
    progress: &LevelProgress,
    character: Option<&Character>,
) -> LeaderboardRow {
    LeaderboardRow::General(GeneralRow {
        rank,
        owner_key: progress.owner_key.clone(),
        name: character.map_or_else(|| UNKNOWN_USER.to_string(), |c| c.name.clone()),
        race: character.map(|c| c.race.clone()),
        job: character.map(|c| c.job.clone()),
        emoji: character.and_then(|c| c.emoji.clone()),
        level: progress.level,
        xp: progress.xp,
        has_character: character.is_some(),
    })
}

pub fn clan_row(rank: u64, clan: &Clan) -> LeaderboardRow {
    LeaderboardRow::Clan(ClanRow {
        rank,
        clan_id: clan.id,
        name: clan.name.clone(),
        level: clan.level,
        points: clan.stats.points,
        member_count: clan.members.len(),
        leader_owner_key: clan.leader().map(|m| m.owner_key.clone()),
    })
}
