//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Leaderboard query parameters (`?type=&page=&limit=&search=`).
///
/// `type` is only read by `/leaderboard`; `/rankings/{category}` takes the
/// category from the path.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}
