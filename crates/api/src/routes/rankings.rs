use axum::routing::get;
use axum::Router;

use crate::handlers::rankings;
use crate::state::AppState;

/// Ranking routes mounted at `/rankings`.
///
/// ```text
/// GET /                    -> list_categories
/// GET /{category}          -> ranking
/// GET /{category}/cards    -> ranking_cards
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rankings::list_categories))
        .route("/{category}", get(rankings::ranking))
        .route("/{category}/cards", get(rankings::ranking_cards))
}
