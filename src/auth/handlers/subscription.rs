/**
 * Subscription Update Handler
 *
 * PATCH /api/users
 *
 * Validates `{subscription}` against the tier enum and updates only
 * that field, returning the sanitized updated record.
 */

use axum::{extract::State, Json};

use crate::auth::handlers::types::UpdateSubscriptionRequest;
use crate::auth::users::{self, User};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;
use crate::validation::validate_subscription_update;

pub async fn update_subscription(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> Result<Json<User>, ApiError> {
    let subscription = validate_subscription_update(&request)?;

    let updated = users::set_subscription(&state.pool, user.id, subscription)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!(email = %updated.email, subscription = subscription.as_str(), "subscription updated");
    Ok(Json(updated))
}
