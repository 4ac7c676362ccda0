//! Character records and their stat block.
//!
//! Characters are written by the game bot and only read here. Every field
//! has a documented baseline so partially-populated documents are defaulted
//! once, at deserialization, and downstream code never sees a gap.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::lenient;
use crate::types::{DbId, OwnerKey};

// ---------------------------------------------------------------------------
// Baselines
// ---------------------------------------------------------------------------

pub const DEFAULT_HP: i64 = 100;
pub const DEFAULT_MP: i64 = 50;
pub const DEFAULT_LEVEL: i32 = 1;
pub const DEFAULT_RACE: &str = "human";
pub const DEFAULT_JOB: &str = "Novice";
pub const DEFAULT_NAME: &str = "Unknown";

// ---------------------------------------------------------------------------
// Stat keys
// ---------------------------------------------------------------------------

/// Named combat attributes shared by character stat blocks and equipment
/// bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    Attack,
    Defense,
    Magic,
    MagicDefense,
    Speed,
    Luck,
    CriticalRate,
    CriticalDamage,
    PenetrationAttack,
    PenetrationMagic,
    Hp,
    MaxHp,
    Mp,
    MaxMp,
}

impl StatKey {
    pub const ALL: [StatKey; 14] = [
        StatKey::Attack,
        StatKey::Defense,
        StatKey::Magic,
        StatKey::MagicDefense,
        StatKey::Speed,
        StatKey::Luck,
        StatKey::CriticalRate,
        StatKey::CriticalDamage,
        StatKey::PenetrationAttack,
        StatKey::PenetrationMagic,
        StatKey::Hp,
        StatKey::MaxHp,
        StatKey::Mp,
        StatKey::MaxMp,
    ];

    /// Parse a stat name as written by the bot, including its short aliases.
    /// Returns `None` for names outside the stat block.
    pub fn parse(name: &str) -> Option<StatKey> {
        let key = match name {
            "attack" | "atk" => StatKey::Attack,
            "defense" | "def" => StatKey::Defense,
            "magic" => StatKey::Magic,
            "magicDefense" | "magicDef" => StatKey::MagicDefense,
            "speed" => StatKey::Speed,
            "luck" => StatKey::Luck,
            "criticalRate" => StatKey::CriticalRate,
            "criticalDamage" => StatKey::CriticalDamage,
            "penetrationAttack" | "penAtk" => StatKey::PenetrationAttack,
            "penetrationMagic" | "penMagic" => StatKey::PenetrationMagic,
            "hp" => StatKey::Hp,
            "maxHp" => StatKey::MaxHp,
            "mp" => StatKey::Mp,
            "maxMp" => StatKey::MaxMp,
            _ => return None,
        };
        Some(key)
    }
}

// ---------------------------------------------------------------------------
// Stat block
// ---------------------------------------------------------------------------

/// A character's combat attributes.
///
/// Serialized in camelCase to match the documents written by the game bot.
/// Missing fields take the baselines: hp/maxHp 100, mp/maxMp 50, 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatBlock {
    #[serde(alias = "atk", deserialize_with = "lenient::integer")]
    pub attack: i64,
    #[serde(alias = "def", deserialize_with = "lenient::integer")]
    pub defense: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub magic: i64,
    #[serde(alias = "magicDef", deserialize_with = "lenient::integer")]
    pub magic_defense: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub speed: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub luck: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub critical_rate: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub critical_damage: i64,
    #[serde(alias = "penAtk", deserialize_with = "lenient::integer")]
    pub penetration_attack: i64,
    #[serde(alias = "penMagic", deserialize_with = "lenient::integer")]
    pub penetration_magic: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub hp: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub max_hp: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub mp: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub max_mp: i64,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            attack: 0,
            defense: 0,
            magic: 0,
            magic_defense: 0,
            speed: 0,
            luck: 0,
            critical_rate: 0,
            critical_damage: 0,
            penetration_attack: 0,
            penetration_magic: 0,
            hp: DEFAULT_HP,
            max_hp: DEFAULT_HP,
            mp: DEFAULT_MP,
            max_mp: DEFAULT_MP,
        }
    }
}

impl StatBlock {
    /// A block with every attribute at zero, used as an accumulator.
    pub fn zeroed() -> Self {
        Self {
            hp: 0,
            max_hp: 0,
            mp: 0,
            max_mp: 0,
            ..Self::default()
        }
    }

    pub fn get(&self, key: StatKey) -> i64 {
        match key {
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Magic => self.magic,
            StatKey::MagicDefense => self.magic_defense,
            StatKey::Speed => self.speed,
            StatKey::Luck => self.luck,
            StatKey::CriticalRate => self.critical_rate,
            StatKey::CriticalDamage => self.critical_damage,
            StatKey::PenetrationAttack => self.penetration_attack,
            StatKey::PenetrationMagic => self.penetration_magic,
            StatKey::Hp => self.hp,
            StatKey::MaxHp => self.max_hp,
            StatKey::Mp => self.mp,
            StatKey::MaxMp => self.max_mp,
        }
    }

    fn slot_mut(&mut self, key: StatKey) -> &mut i64 {
        match key {
            StatKey::Attack => &mut self.attack,
            StatKey::Defense => &mut self.defense,
            StatKey::Magic => &mut self.magic,
            StatKey::MagicDefense => &mut self.magic_defense,
            StatKey::Speed => &mut self.speed,
            StatKey::Luck => &mut self.luck,
            StatKey::CriticalRate => &mut self.critical_rate,
            StatKey::CriticalDamage => &mut self.critical_damage,
            StatKey::PenetrationAttack => &mut self.penetration_attack,
            StatKey::PenetrationMagic => &mut self.penetration_magic,
            StatKey::Hp => &mut self.hp,
            StatKey::MaxHp => &mut self.max_hp,
            StatKey::Mp => &mut self.mp,
            StatKey::MaxMp => &mut self.max_mp,
        }
    }

    /// Add `amount` to one attribute.
    pub fn add(&mut self, key: StatKey, amount: i64) {
        let slot = self.slot_mut(key);
        *slot = slot.saturating_add(amount);
    }

    /// Field-by-field sum of two blocks.
    pub fn plus(&self, other: &StatBlock) -> StatBlock {
        let mut merged = *self;
        for key in StatKey::ALL {
            merged.add(key, other.get(key));
        }
        merged
    }
}

// ---------------------------------------------------------------------------
// Advancement
// ---------------------------------------------------------------------------

/// Lifetime activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Advancement {
    pub monsters_killed: i64,
    pub items_crafted: i64,
    pub resources_gathered: i64,
    pub bosses_killed: i64,
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub id: DbId,
    pub owner_key: OwnerKey,
    pub name: String,
    pub race: String,
    pub job: String,
    pub level: i32,
    pub experience: i64,
    pub stats: StatBlock,
    pub currency: Currency,
    /// Signed: positive for heroes, negative for villains.
    pub reputation: i64,
    pub bounty: i64,
    pub killed_players: i64,
    pub rp_points: i64,
    pub advancement: Advancement,
    pub title: Option<String>,
    pub guild: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            id: 0,
            owner_key: String::new(),
            name: String::new(),
            race: DEFAULT_RACE.to_string(),
            job: DEFAULT_JOB.to_string(),
            level: DEFAULT_LEVEL,
            experience: 0,
            stats: StatBlock::default(),
            currency: Currency::default(),
            reputation: 0,
            bounty: 0,
            killed_players: 0,
            rp_points: 0,
            advancement: Advancement::default(),
            title: None,
            guild: None,
            description: None,
            emoji: None,
        }
    }
}

impl Character {
    /// Apply the baselines for values the bot may leave blank or out of
    /// range. Called once by every store implementation on the way out.
    pub fn normalize(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = DEFAULT_NAME.to_string();
        }
        if self.race.trim().is_empty() {
            self.race = DEFAULT_RACE.to_string();
        }
        if self.job.trim().is_empty() {
            self.job = DEFAULT_JOB.to_string();
        }
        self.level = self.level.max(DEFAULT_LEVEL);
        self.experience = self.experience.max(0);
        self.bounty = self.bounty.max(0);
        self.killed_players = self.killed_players.max(0);
        self.rp_points = self.rp_points.max(0);
        self.currency = self.currency.normalize();
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
