/**
 * Signup Handler
 *
 * POST /api/users/signup
 *
 * 1. Validate the body (email format, password length, subscription enum)
 * 2. Reject already-registered emails with 409
 * 3. Hash the password with bcrypt (random per-user salt)
 * 4. Derive the default gravatar avatar and a one-time verification token
 * 5. Persist the user unverified
 * 6. Send the verification email
 * 7. Return 201 with the public user payload
 *
 * The password and the verification token never appear in the response.
 * If the verification mail fails to send, the error propagates as 500
 * after the user row was created; re-sending is what POST /verify is for.
 */

use axum::{extract::State, http::StatusCode, Json};
use bcrypt::{hash, DEFAULT_COST};
use uuid::Uuid;

use crate::auth::handlers::types::{SignupRequest, SignupResponse, UserPayload};
use crate::auth::users::{self, NewUser};
use crate::avatar::gravatar_url;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::validation::validate_signup;

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let validated = validate_signup(&request)?;
    tracing::info!(email = %validated.email, "signup request");

    if users::find_by_email(&state.pool, &validated.email)
        .await?
        .is_some()
    {
        tracing::warn!(email = %validated.email, "signup with registered email");
        return Err(ApiError::conflict("Email in use"));
    }

    let password_hash = hash(&validated.password, DEFAULT_COST)?;
    let verification_token = Uuid::new_v4().to_string();

    let user = users::create_user(
        &state.pool,
        NewUser {
            avatar_url: gravatar_url(&validated.email),
            email: validated.email,
            password_hash,
            subscription: validated.subscription,
            verification_token: verification_token.clone(),
        },
    )
    .await?;

    state
        .mailer
        .send_verification(&user.email, &verification_token)
        .await?;

    tracing::info!(email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: UserPayload::from(&user),
        }),
    ))
}
