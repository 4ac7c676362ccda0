//! Leaderboards.
//!
//! - [`plan`] maps each [`Category`] to a static query plan.
//! - [`engine`] runs a plan against an [`crate::store::EntityStore`] and
//!   returns one page of typed rows.
//! - [`rows`] holds the per-category row variants.
//! - [`card`] projects rows into the small cards the dashboard renders.

pub mod card;
pub mod engine;
pub mod plan;
pub mod rows;

use serde::{Deserialize, Serialize};

pub use engine::{Leaderboard, LeaderboardPage, PageRequest};
pub use plan::{resolve, PostFetch, QueryPlan, Source};
pub use rows::LeaderboardRow;

/// The fixed set of ranking dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Character level.
    Rpg,
    /// Chat-activity level progress.
    General,
    /// Total wealth across all coin denominations.
    Money,
    Bounty,
    /// Population per race.
    Race,
    /// Player kills.
    Pk,
    /// Roleplay points.
    Rp,
    Clan,
    Gatherer,
    Crafter,
    /// Highest positive reputation.
    Heroes,
    /// Most negative reputation.
    Villains,
    Hunter,
    Boss,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Rpg,
        Category::General,
        Category::Money,
        Category::Bounty,
        Category::Race,
        Category::Pk,
        Category::Rp,
        Category::Clan,
        Category::Gatherer,
        Category::Crafter,
        Category::Heroes,
        Category::Villains,
        Category::Hunter,
        Category::Boss,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rpg => "rpg",
            Category::General => "general",
            Category::Money => "money",
            Category::Bounty => "bounty",
            Category::Race => "race",
            Category::Pk => "pk",
            Category::Rp => "rp",
            Category::Clan => "clan",
            Category::Gatherer => "gatherer",
            Category::Crafter => "crafter",
            Category::Heroes => "heroes",
            Category::Villains => "villains",
            Category::Hunter => "hunter",
            Category::Boss => "boss",
        }
    }

    /// Parse a category name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Category> {
        let name = name.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
