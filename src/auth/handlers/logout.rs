/**
 * Logout Handler
 *
 * GET /api/users/logout
 *
 * Clears the stored session token, unconditionally invalidating the
 * token that just authenticated this request. Answers 204 with no body.
 */

use axum::{extract::State, http::StatusCode};

use crate::auth::users;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, ApiError> {
    users::set_session_token(&state.pool, user.id, None).await?;
    tracing::info!(email = %user.email, "logged out");
    Ok(StatusCode::NO_CONTENT)
}
