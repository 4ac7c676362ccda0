//! Staff login check.

use axum::extract::State;
use axum::Json;
use rpgdash_core::permissions::admin_password_matches;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// POST /api/v1/admin/login
///
/// Lets the dashboard check a password before showing the editor. The
/// password is still sent with every write.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Json<LoginResponse> {
    let success = admin_password_matches(state.config.admin_password.as_deref(), &input.password);
    if !success {
        tracing::warn!("Failed admin login attempt");
    }
    Json(LoginResponse { success })
}
