//! Activity feed entries written by the game bot.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Number of entries shown in the activity ticker.
pub const ACTIVITY_FEED_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Death,
    Kill,
    Market,
    Event,
    Other,
}

impl ActivityKind {
    /// Map the stored type string; unrecognized types become `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "death" => ActivityKind::Death,
            "kill" => ActivityKind::Kill,
            "market" => ActivityKind::Market,
            "event" => ActivityKind::Event,
            _ => ActivityKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown_kinds() {
        assert_eq!(ActivityKind::parse("kill"), ActivityKind::Kill);
        assert_eq!(ActivityKind::parse(" Market "), ActivityKind::Market);
        assert_eq!(ActivityKind::parse("levelup"), ActivityKind::Other);
    }
}
