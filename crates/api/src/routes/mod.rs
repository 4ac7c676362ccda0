pub mod admin;
pub mod health;
pub mod permissions;
pub mod rankings;

use axum::routing::get;
use axum::Router;

use crate::handlers::{feed, profiles, rankings as ranking_handlers};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /leaderboard                         one page (?type, page, limit, search)
///
/// /rankings                            category names (GET)
/// /rankings/{category}                 one page (?page, limit, search)
/// /rankings/{category}/cards           one page as display cards
///
/// /characters/{key}                    character profile (owner key or id)
/// /clans/{id}                          clan profile
///
/// /market                              open listings (GET)
/// /activity                            recent activity (GET)
/// /stats                               server stats (GET)
///
/// /permissions/{guild_id}              list, grant, revoke (GET, POST, DELETE)
/// /permissions/{guild_id}/command      register command (POST)
///
/// /admin/login                         check admin password (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(ranking_handlers::leaderboard))
        .nest("/rankings", rankings::router())
        // Profiles.
        .route("/characters/{key}", get(profiles::get_character))
        .route("/clans/{id}", get(profiles::get_clan))
        // Side panels.
        .route("/market", get(feed::list_market))
        .route("/activity", get(feed::recent_activity))
        .route("/stats", get(feed::server_stats))
        // Staff editing.
        .nest("/permissions", permissions::router())
        .nest("/admin", admin::router())
}
