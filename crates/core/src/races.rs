//! Race display lookup used by the race population ranking.

/// Display data for a playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub tier: &'static str,
}

const fn race(
    key: &'static str,
    name: &'static str,
    emoji: &'static str,
    tier: &'static str,
) -> RaceInfo {
    RaceInfo {
        key,
        name,
        emoji,
        tier,
    }
}

pub const RACES: &[RaceInfo] = &[
    race("human", "Human", "👤", "Common"),
    race("elf", "Elf", "🧝", "Common"),
    race("dwarf", "Dwarf", "🧔", "Common"),
    race("orc", "Orc", "👹", "Common"),
    race("halfling", "Halfling", "🧒", "Uncommon"),
    race("gnome", "Gnome", "🧙", "Uncommon"),
    race("halfelf", "Half-Elf", "🧝‍♂️", "Uncommon"),
    race("halforc", "Half-Orc", "👺", "Uncommon"),
    race("darkelf", "Dark Elf", "🕷️", "Rare"),
    race("dragonborn", "Dragonborn", "🐉", "Rare"),
    race("tiefling", "Tiefling", "😈", "Rare"),
    race("beastkin", "Beastkin", "🐺", "Rare"),
    race("angel", "Angel", "👼", "Epic"),
    race("demon", "Demon", "👿", "Epic"),
    race("ancientdragonkin", "Ancient Dragonkin", "🐲", "Mythical"),
    race("etherealbeing", "Ethereal Being", "👻", "Mythical"),
];

/// Fallback avatar for unknown races.
pub const UNKNOWN_RACE_EMOJI: &str = "👤";

/// Canonical lookup key: lower-case with all whitespace removed
/// (`"Dark Elf"` -> `"darkelf"`).
pub fn race_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up a race by raw or canonical name.
pub fn lookup(raw: &str) -> Option<&'static RaceInfo> {
    let key = race_key(raw);
    RACES.iter().find(|r| r.key == key)
}
