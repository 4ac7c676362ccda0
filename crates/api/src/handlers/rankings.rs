//! Handlers for leaderboards and rank cards.
//!
//! Every category shares one engine; the handlers only turn query parameters
//! into a validated [`PageRequest`] and wrap the result.

use axum::extract::{Path, Query, State};
use axum::Json;
use rpgdash_core::ranking::card::{project_all, RankCard};
use rpgdash_core::ranking::{Category, Leaderboard, LeaderboardPage, PageRequest};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::query::LeaderboardParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Category used by `/leaderboard` when `type` is absent.
const DEFAULT_CATEGORY: Category = Category::Rpg;

/// A leaderboard page projected into display cards.
#[derive(Debug, Serialize)]
pub struct CardPage {
    pub category: String,
    pub page: u64,
    pub page_size: u64,
    pub has_more: bool,
    pub cards: Vec<RankCard>,
}

/// Resolve `page`/`limit` against the configured defaults. `limit` is
/// clamped to `[1, max]`; `page = 0` is rejected.
pub fn page_request(params: &LeaderboardParams, config: &ServerConfig) -> AppResult<PageRequest> {
    let page = params.page.unwrap_or(1);
    let page_size = params
        .limit
        .unwrap_or(config.leaderboard_page_size)
        .clamp(1, config.leaderboard_max_page_size.max(1));
    Ok(PageRequest::new(page, page_size)?)
}

async fn load_page(
    state: &AppState,
    category: &str,
    params: &LeaderboardParams,
) -> AppResult<LeaderboardPage> {
    let request = page_request(params, &state.config)?;
    let page = Leaderboard::new(state.store.as_ref())
        .list(category, request, params.search.as_deref())
        .await?;
    Ok(page)
}

/// GET /api/v1/leaderboard?type=&page=&limit=&search=
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<LeaderboardPage>>> {
    let category = params
        .category
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORY.as_str().to_string());
    let page = load_page(&state, &category, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/rankings
///
/// The category names accepted by the ranking endpoints.
pub async fn list_categories() -> Json<DataResponse<Vec<&'static str>>> {
    Json(DataResponse {
        data: Category::ALL.iter().map(|c| c.as_str()).collect(),
    })
}

/// GET /api/v1/rankings/{category}?page=&limit=&search=
pub async fn ranking(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<LeaderboardPage>>> {
    let page = load_page(&state, &category, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/rankings/{category}/cards?page=&limit=&search=
pub async fn ranking_cards(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<CardPage>>> {
    let page = load_page(&state, &category, &params).await?;
    let cards = project_all(&page.rows);
    Ok(Json(DataResponse {
        data: CardPage {
            category: page.category,
            page: page.page,
            page_size: page.page_size,
            has_more: page.has_more,
            cards,
        },
    }))
}
