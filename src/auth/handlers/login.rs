/**
 * Login Handler
 *
 * POST /api/users/login
 *
 * Unknown email, unverified account and wrong password all answer 401
 * with the same message, so a response never reveals which check
 * failed. On success a fresh one-hour JWT is signed and written into
 * the user's single session slot, which invalidates any earlier token.
 */

use axum::{extract::State, Json};
use bcrypt::verify;

use crate::auth::handlers::types::{LoginRequest, LoginResponse, UserPayload};
use crate::auth::{sessions, users};
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::validation::validate_login;

const BAD_CREDENTIALS: &str = "Email or password is wrong";

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let validated = validate_login(&request)?;
    tracing::info!(email = %validated.email, "login request");

    let user = users::find_by_email(&state.pool, &validated.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!(email = %validated.email, "login with unknown email");
            ApiError::unauthorized(BAD_CREDENTIALS)
        })?;

    if !user.verified {
        tracing::warn!(email = %user.email, "login on unverified account");
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    if !verify(&validated.password, &user.password_hash)? {
        tracing::warn!(email = %user.email, "login with wrong password");
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = sessions::create_token(&state.config.jwt_secret, user.id)
        .map_err(|e| ApiError::internal(format!("failed to sign token: {e}")))?;
    users::set_session_token(&state.pool, user.id, Some(&token)).await?;

    tracing::info!(email = %user.email, "login successful");
    Ok(Json(LoginResponse {
        token,
        user: UserPayload::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::auth::users::{NewUser, Subscription};
    use crate::server::test_support::test_state;

    async fn seed_user(state: &AppState, email: &str, password: &str, verified: bool) {
        let user = users::create_user(
            &state.pool,
            NewUser {
                email: email.to_string(),
                password_hash: bcrypt::hash(password, 4).unwrap(),
                subscription: Subscription::Starter,
                verification_token: uuid::Uuid::new_v4().to_string(),
                avatar_url: "x".to_string(),
            },
        )
        .await
        .unwrap();
        if verified {
            users::set_verified(&state.pool, user.id).await.unwrap();
        }
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_success_persists_session_token() {
        let state = test_state().await;
        seed_user(&state, "a@x.com", "123456", true).await;

        let response = login(State(state.clone()), Json(request("a@x.com", "123456")))
            .await
            .unwrap();
        assert!(!response.token.is_empty());

        let stored = users::find_by_email(&state.pool, "a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.token.as_deref(), Some(response.token.as_str()));
    }

    #[tokio::test]
    async fn test_login_unverified_rejected_with_generic_message() {
        let state = test_state().await;
        seed_user(&state, "u@x.com", "123456", false).await;

        let err = login(State(state), Json(request("u@x.com", "123456")))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), BAD_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user_look_identical() {
        let state = test_state().await;
        seed_user(&state, "a@x.com", "123456", true).await;

        let wrong_password = login(State(state.clone()), Json(request("a@x.com", "654321")))
            .await
            .unwrap_err();
        let unknown_user = login(State(state), Json(request("b@x.com", "123456")))
            .await
            .unwrap_err();
        assert_eq!(wrong_password.message(), unknown_user.message());
        assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    }
}
