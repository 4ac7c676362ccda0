//! Admin password extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rpgdash_core::error::CoreError;
use rpgdash_core::permissions::admin_password_matches;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the staff password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Requires `x-admin-password` to match the configured admin password.
/// Rejects with 401 Unauthorized otherwise, including when no password is
/// configured.
///
/// ```ignore
/// async fn edit(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !admin_password_matches(state.config.admin_password.as_deref(), supplied) {
            tracing::warn!("Rejected admin request with missing or wrong password");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin password".into(),
            )));
        }
        Ok(RequireAdmin)
    }
}
