//! Handlers for the dashboard side panels: market, activity ticker and
//! server stats.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rpgdash_core::activity::{ActivityEntry, ACTIVITY_FEED_LIMIT};
use rpgdash_core::market::MarketListing;
use rpgdash_core::EntityStore;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: MarketListing,
    pub bid_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ServerStats {
    pub total_players: i64,
}

/// GET /api/v1/market
///
/// Open listings, soonest-ending first.
pub async fn list_market(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ListingView>>>> {
    let listings = state.store.find_open_listings(Utc::now()).await?;
    let data = listings
        .into_iter()
        .map(|listing| ListingView {
            bid_count: listing.bid_count(),
            listing,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/activity
pub async fn recent_activity(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ActivityEntry>>>> {
    let entries = state.store.recent_activity(ACTIVITY_FEED_LIMIT).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/stats
pub async fn server_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ServerStats>>> {
    let total_players = state.store.count_characters().await?;
    Ok(Json(DataResponse {
        data: ServerStats { total_players },
    }))
}
