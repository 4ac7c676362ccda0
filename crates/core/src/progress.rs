//! Chat-activity level progress, a progression axis separate from the
//! character's own level.

use serde::{Deserialize, Serialize};

use crate::character::DEFAULT_LEVEL;
use crate::types::OwnerKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelProgress {
    pub owner_key: OwnerKey,
    pub level: i32,
    pub xp: i64,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self {
            owner_key: String::new(),
            level: DEFAULT_LEVEL,
            xp: 0,
        }
    }
}

impl LevelProgress {
    /// Progress for an owner that has never been tracked.
    pub fn initial(owner_key: impl Into<OwnerKey>) -> Self {
        Self {
            owner_key: owner_key.into(),
            ..Self::default()
        }
    }

    pub fn normalize(mut self) -> Self {
        self.level = self.level.max(DEFAULT_LEVEL);
        self.xp = self.xp.max(0);
        self
    }
}
