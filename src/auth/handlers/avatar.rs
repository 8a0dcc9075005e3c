/**
 * Avatar Upload Handler
 *
 * PATCH /api/users/avatars, multipart with a single file field named
 * "avatar". Runs the resize pipeline, then persists the new URL; the
 * database write is the commit point, and if it fails the already
 * placed file is removed so no user-visible state changes.
 */

use axum::{extract::Multipart, extract::State, Json};

use crate::auth::handlers::types::AvatarResponse;
use crate::auth::users;
use crate::avatar::store_avatar;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;

pub async fn update_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("malformed multipart body"))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("avatar").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("failed to read avatar upload"))?
            .to_vec();

        let stored = store_avatar(&state.config.public_dir, user.id, &original_name, data).await?;

        if let Err(e) = users::set_avatar_url(&state.pool, user.id, &stored.url).await {
            let _ = tokio::fs::remove_file(&stored.path).await;
            return Err(e.into());
        }

        tracing::info!(email = %user.email, url = %stored.url, "avatar updated");
        return Ok(Json(AvatarResponse {
            avatar_url: stored.url,
        }));
    }

    Err(ApiError::bad_request("missing avatar file field"))
}
