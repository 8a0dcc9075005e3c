/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user:
 *
 * 1. Extract the bearer token from the Authorization header
 * 2. Verify signature and expiry against the shared secret
 * 3. Load the user named by the token's subject
 * 4. Compare the presented token with the user's stored session slot,
 *    which rejects tokens invalidated by logout or a newer login
 * 5. Attach the user to request extensions for downstream handlers
 *
 * Every failure mode is a plain 401; nothing about the cause leaks to
 * the client.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::verify_token;
use crate::auth::users::{self, User};
use crate::error::ApiError;
use crate::server::state::AppState;

const NOT_AUTHORIZED: &str = "Not authorized";

/// The authenticated user, inserted into request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

fn unauthorized() -> ApiError {
    ApiError::unauthorized(NOT_AUTHORIZED)
}

/// Middleware guarding authenticated routes.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("missing Authorization header");
            unauthorized()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("malformed Authorization header");
        unauthorized()
    })?;

    let claims = verify_token(&state.config.jwt_secret, token).map_err(|e| {
        tracing::warn!("token verification failed: {e}");
        unauthorized()
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::warn!("token subject is not a valid user id");
        unauthorized()
    })?;

    let user = users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%user_id, "token subject does not exist");
            unauthorized()
        })?;

    // A logged-out or superseded session has a different stored token.
    if user.token.as_deref() != Some(token) {
        tracing::warn!(%user_id, "token does not match the active session");
        return Err(unauthorized());
    }

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Extractor handing handlers the user attached by [`authenticate`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(|current| AuthUser(current.0))
            .ok_or_else(|| {
                tracing::error!("AuthUser used on a route without the authenticate layer");
                unauthorized()
            })
    }
}
