//! Route definitions for command permissions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::permissions;
use crate::state::AppState;

/// Permission routes mounted at `/permissions`.
///
/// ```text
/// GET    /{guild_id}            -> list_permissions
/// POST   /{guild_id}            -> add_role (admin)
/// DELETE /{guild_id}            -> remove_role (admin)
/// POST   /{guild_id}/command    -> create_command (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{guild_id}",
            get(permissions::list_permissions)
                .post(permissions::add_role)
                .delete(permissions::remove_role),
        )
        .route("/{guild_id}/command", post(permissions::create_command))
}
