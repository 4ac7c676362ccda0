//! Clan records, member hydration and leader resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::character::{Character, DEFAULT_LEVEL};
use crate::currency::Currency;
use crate::types::{DbId, OwnerKey, Timestamp};

/// Role name carried by the clan leader.
pub const ROLE_LEADER: &str = "leader";

/// How many members the clan profile highlights.
pub const TOP_MEMBER_COUNT: usize = 5;

const UNKNOWN_MEMBER_NAME: &str = "Unknown";
const UNKNOWN_MEMBER_JOB: &str = "Member";
const UNKNOWN_MEMBER_RACE: &str = "Human";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClanStats {
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClanSettings {
    pub max_members: i32,
    pub status: String,
}

impl Default for ClanSettings {
    fn default() -> Self {
        Self {
            max_members: 20,
            status: "open".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClanMember {
    pub owner_key: OwnerKey,
    pub role: String,
    pub contribution: i64,
    pub joined_at: Option<Timestamp>,
}

impl ClanMember {
    pub fn is_leader(&self) -> bool {
        self.role.eq_ignore_ascii_case(ROLE_LEADER)
    }
}

/// A clan with its members in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clan {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub description: Option<String>,
    pub stats: ClanStats,
    pub treasury: Currency,
    pub settings: ClanSettings,
    pub members: Vec<ClanMember>,
}

impl Default for Clan {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            level: DEFAULT_LEVEL,
            description: None,
            stats: ClanStats::default(),
            treasury: Currency::default(),
            settings: ClanSettings::default(),
            members: Vec::new(),
        }
    }
}

impl Clan {
    /// The first member holding the leader role.
    ///
    /// Exactly one leader is expected but not enforced by the bot; zero or
    /// several leaders are tolerated here and resolve to the first match.
    pub fn leader(&self) -> Option<&ClanMember> {
        self.members.iter().find(|m| m.is_leader())
    }

    pub fn member_owner_keys(&self) -> Vec<OwnerKey> {
        self.members.iter().map(|m| m.owner_key.clone()).collect()
    }

    pub fn normalize(mut self) -> Self {
        self.level = self.level.max(DEFAULT_LEVEL);
        self.treasury = self.treasury.normalize();
        self
    }
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

/// A clan member enriched with fields copied from their character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydratedMember {
    pub owner_key: OwnerKey,
    pub role: String,
    pub contribution: i64,
    pub name: String,
    pub level: i32,
    pub job: String,
    pub race: String,
    pub has_character: bool,
}

/// Clan profile as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClanProfile {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub description: Option<String>,
    pub stats: ClanStats,
    pub treasury: Currency,
    pub settings: ClanSettings,
    pub member_count: usize,
    pub leader: Option<HydratedMember>,
    pub members: Vec<HydratedMember>,
    pub top_members: Vec<HydratedMember>,
}

/// Copy name/level/job/race onto each member. Members without a character
/// get placeholder values instead of being dropped.
pub fn hydrate_members(clan: &Clan, characters: &[Character]) -> Vec<HydratedMember> {
    let by_owner: HashMap<&str, &Character> = characters
        .iter()
        .map(|c| (c.owner_key.as_str(), c))
        .collect();

    clan.members
        .iter()
        .map(|member| match by_owner.get(member.owner_key.as_str()) {
            Some(character) => HydratedMember {
                owner_key: member.owner_key.clone(),
                role: member.role.clone(),
                contribution: member.contribution,
                name: character.name.clone(),
                level: character.level,
                job: character.job.clone(),
                race: character.race.clone(),
                has_character: true,
            },
            None => HydratedMember {
                owner_key: member.owner_key.clone(),
                role: member.role.clone(),
                contribution: member.contribution,
                name: UNKNOWN_MEMBER_NAME.to_string(),
                level: DEFAULT_LEVEL,
                job: UNKNOWN_MEMBER_JOB.to_string(),
                race: UNKNOWN_MEMBER_RACE.to_string(),
                has_character: false,
            },
        })
        .collect()
}

/// Build the clan profile from the clan and its members' characters.
pub fn build_profile(clan: &Clan, characters: &[Character]) -> ClanProfile {
    let members = hydrate_members(clan, characters);
    let leader = members
        .iter()
        .find(|m| m.role.eq_ignore_ascii_case(ROLE_LEADER))
        .cloned();

    // Stable sort keeps join order among equal contributions.
    let mut top_members = members.clone();
    top_members.sort_by(|a, b| b.contribution.cmp(&a.contribution));
    top_members.truncate(TOP_MEMBER_COUNT);

    ClanProfile {
        id: clan.id,
        name: clan.name.clone(),
        level: clan.level,
        description: clan.description.clone(),
        stats: clan.stats,
        treasury: clan.treasury,
        settings: clan.settings.clone(),
        member_count: members.len(),
        leader,
        members,
        top_members,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn member(owner_key: &str, role: &str, contribution: i64) -> ClanMember {
        ClanMember {
            owner_key: owner_key.into(),
            role: role.into(),
            contribution,
            joined_at: None,
        }
    }

    fn character(owner_key: &str, name: &str) -> Character {
        Character {
            owner_key: owner_key.into(),
            name: name.into(),
            level: 12,
            job: "Blacksmith".into(),
            race: "dwarf".into(),
            ..Character::default()
        }
    }

    fn clan(members: Vec<ClanMember>) -> Clan {
        Clan {
            id: 7,
            name: "Iron Wolves".into(),
            members,
            ..Clan::default()
        }
    }

    #[test]
    fn leader_is_first_case_insensitive_match() {
        let c = clan(vec![
            member("1", "member", 0),
            member("2", "Leader", 0),
            member("3", "leader", 0),
        ]);
        assert_eq!(c.leader().map(|m| m.owner_key.as_str()), Some("2"));
    }

    #[test]
    fn clan_without_leader_resolves_to_none() {
        let c = clan(vec![member("1", "member", 0)]);
        assert!(c.leader().is_none());
        assert!(build_profile(&c, &[]).leader.is_none());
    }

    #[test]
    fn members_without_character_get_placeholders() {
        let c = clan(vec![member("1", "leader", 10), member("2", "member", 5)]);
        let members = hydrate_members(&c, &[character("1", "Brak")]);

        assert_eq!(members[0].name, "Brak");
        assert_eq!(members[0].level, 12);
        assert!(members[0].has_character);

        assert_eq!(members[1].name, "Unknown");
        assert_eq!(members[1].level, 1);
        assert_eq!(members[1].job, "Member");
        assert_eq!(members[1].race, "Human");
        assert!(!members[1].has_character);
    }

    #[test]
    fn top_members_sorted_by_contribution_and_capped() {
        let c = clan(vec![
            member("1", "member", 5),
            member("2", "member", 50),
            member("3", "leader", 20),
            member("4", "member", 5),
            member("5", "member", 1),
            member("6", "member", 30),
        ]);
        let profile = build_profile(&c, &[]);

        let order: Vec<&str> = profile
            .top_members
            .iter()
            .map(|m| m.owner_key.as_str())
            .collect();
        assert_eq!(order, vec!["2", "6", "3", "1", "4"]);
        assert_eq!(profile.member_count, 6);
        assert_eq!(profile.leader.map(|m| m.owner_key), Some("3".to_string()));
    }
}
