/**
 * Current User Handler
 *
 * GET /api/users/current
 *
 * Returns the public payload of the authenticated user. The middleware
 * already fetched the record, so no extra store round-trip happens here.
 */

use axum::Json;

use crate::auth::handlers::types::{CurrentResponse, UserPayload};
use crate::middleware::AuthUser;

pub async fn current(AuthUser(user): AuthUser) -> Json<CurrentResponse> {
    Json(CurrentResponse {
        user: UserPayload::from(&user),
    })
}
