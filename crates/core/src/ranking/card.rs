//! Presentation projector: turns leaderboard rows into display cards.
//!
//! A card is an avatar, a name, a one-line subtitle and three labelled
//! stats. The projection matches on the row variant only; no field probing.

use serde::Serialize;

use crate::character::DEFAULT_RACE;
use crate::races::{self, UNKNOWN_RACE_EMOJI};
use crate::ranking::rows::{CharacterSummary, LeaderboardRow, Milestone};

const CLAN_AVATAR: &str = "🏰";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardStat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankCard {
    pub rank: u64,
    pub avatar: String,
    pub name: String,
    pub meta: String,
    pub stats: Vec<CardStat>,
}

fn stat(label: &'static str, value: impl ToString) -> CardStat {
    CardStat {
        label,
        value: value.to_string(),
    }
}

/// The character's own emoji, else its race emoji.
fn avatar(emoji: Option<&str>, race: Option<&str>) -> String {
    if let Some(emoji) = emoji.filter(|e| !e.trim().is_empty()) {
        return emoji.to_string();
    }
    races::lookup(race.unwrap_or(DEFAULT_RACE))
        .map_or(UNKNOWN_RACE_EMOJI, |r| r.emoji)
        .to_string()
}

fn character_card(
    rank: u64,
    c: &CharacterSummary,
    meta: impl Into<String>,
    stats: Vec<CardStat>,
) -> RankCard {
    RankCard {
        rank,
        avatar: avatar(c.emoji.as_deref(), Some(c.race.as_str())),
        name: c.name.clone(),
        meta: meta.into(),
        stats,
    }
}

/// Format a number the way the dashboard shows large counts: `999`,
/// `1.2K`, `3.4M`, `1B`, `2.5T`. At most one fractional digit.
pub fn format_compact(value: i64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

    let magnitude = (value as f64).abs();
    if magnitude < 1e3 {
        return value.to_string();
    }
    let sign = if value < 0 { "-" } else { "" };

    // Smallest unit whose rounded value stays below 1000, so 999_999 is
    // "1M" rather than "1000K".
    let rounded = |scale: f64| (magnitude / scale * 10.0).round() / 10.0;
    let (scale, suffix) = UNITS
        .into_iter()
        .find(|(scale, _)| rounded(*scale) < 1000.0)
        .unwrap_or(UNITS[UNITS.len() - 1]);
    let scaled = rounded(scale);

    if scaled.fract() == 0.0 {
        format!("{sign}{}{suffix}", scaled as i64)
    } else {
        format!("{sign}{scaled:.1}{suffix}")
    }
}

/// Project one leaderboard row into a card.
pub fn project(row: &LeaderboardRow) -> RankCard {
    match row {
        LeaderboardRow::Rpg(r) => character_card(
            r.rank,
            &r.character,
            format!("{} • {}", r.character.race, r.character.job),
            vec![
                stat("LVL", r.character.level),
                stat("ATK", r.attack),
                stat("DEF", r.defense),
            ],
        ),
        LeaderboardRow::General(r) => RankCard {
            rank: r.rank,
            avatar: avatar(r.emoji.as_deref(), r.race.as_deref()),
            name: r.name.clone(),
            meta: format!("{} • Level {}", r.race.as_deref().unwrap_or("User"), r.level),
            stats: vec![
                stat("LVL", r.level),
                stat("XP", format_compact(r.xp)),
                stat("JOB", r.job.as_deref().unwrap_or("Member")),
            ],
        },
        LeaderboardRow::Money(r) => character_card(
            r.rank,
            &r.character,
            "Wealthy Elite",
            vec![
                stat("WEALTH", format_compact(r.total_value)),
                stat("LVL", r.character.level),
                stat("JOB", &r.character.job),
            ],
        ),
        LeaderboardRow::Bounty(r) => character_card(
            r.rank,
            &r.character,
            "Wanted Criminal",
            vec![
                stat("BOUNTY", format_compact(r.bounty)),
                stat("LVL", r.character.level),
                stat("JOB", &r.character.job),
            ],
        ),
        LeaderboardRow::Pk(r) => character_card(
            r.rank,
            &r.character,
            "Serial Killer",
            vec![
                stat("KILLS", r.killed_players),
                stat("BOUNTY", format_compact(r.bounty)),
                stat("TITLE", r.character.title.as_deref().unwrap_or("None")),
            ],
        ),
        LeaderboardRow::Rp(r) => character_card(
            r.rank,
            &r.character,
            "Roleplayer",
            vec![
                stat("RP Points", r.rp_points),
                stat("LVL", r.character.level),
                stat("RACE", &r.character.race),
            ],
        ),
        LeaderboardRow::Race(r) => RankCard {
            rank: r.rank,
            avatar: r.emoji.clone(),
            name: r.display_name.clone(),
            meta: "Racial Population".to_string(),
            stats: vec![
                stat("POPULATION", r.count),
                stat("TIER", r.tier.as_deref().unwrap_or("?")),
                stat("ACTIVE", "Yes"),
            ],
        },
        LeaderboardRow::Clan(r) => RankCard {
            rank: r.rank,
            avatar: CLAN_AVATAR.to_string(),
            name: r.name.clone(),
            meta: format!("Level {} Guild", r.level),
            stats: vec![
                stat("LEVEL", r.level),
                stat("POINTS", format_compact(r.points)),
                stat("MEMBERS", r.member_count),
            ],
        },
        LeaderboardRow::Milestone(r) => {
            let (meta, label, count) = match r.milestone {
                Milestone::ResourcesGathered => {
                    ("Master Gatherer", "GATHERED", format_compact(r.count))
                }
                Milestone::ItemsCrafted => ("Master Smith", "CRAFTED", format_compact(r.count)),
                Milestone::MonstersKilled => ("Monster Slayer", "KILLS", format_compact(r.count)),
                Milestone::BossesKilled => ("Raid Legend", "BOSSES", r.count.to_string()),
            };
            character_card(
                r.rank,
                &r.character,
                meta,
                vec![
                    stat(label, count),
                    stat("LVL", r.character.level),
                    stat("JOB", &r.character.job),
                ],
            )
        }
        LeaderboardRow::Reputation(r) => {
            let (meta, fallback_title) = if r.reputation < 0 {
                ("Villain", "Villain")
            } else {
                ("Guardian", "Hero")
            };
            character_card(
                r.rank,
                &r.character,
                meta,
                vec![
                    stat("REP", r.reputation),
                    stat("LVL", r.character.level),
                    stat(
                        "TITLE",
                        r.character.title.as_deref().unwrap_or(fallback_title),
                    ),
                ],
            )
        }
    }
}

/// Project a whole page.
pub fn project_all(rows: &[LeaderboardRow]) -> Vec<RankCard> {
    rows.iter().map(project).collect()
}
