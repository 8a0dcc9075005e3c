/**
 * Email Verification Handlers
 *
 * GET /api/users/verify/{token} - consume a verification token: 404 if
 * no user carries it, otherwise mark the account verified and clear
 * the token. Two concurrent requests for the same token may race, but
 * the operation is idempotent in effect, so the loser simply gets 404.
 *
 * POST /api/users/verify - re-send the verification mail for a known,
 * still-unverified account using its existing token.
 */

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::handlers::types::{MessageResponse, ResendVerificationRequest};
use crate::auth::users;
use crate::error::ApiError;
use crate::server::state::AppState;

pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = users::find_by_verification_token(&state.pool, &token)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    users::set_verified(&state.pool, user.id).await?;

    tracing::info!(email = %user.email, "email verified");
    Ok(Json(MessageResponse::new("Verification successful")))
}

pub async fn resend_verification(
    State(state): State<AppState>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = request
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("missing required field email"))?;

    let user = users::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.verified {
        return Err(ApiError::bad_request(
            "Verification has already been passed",
        ));
    }

    // An unverified account always carries its token.
    let token = user
        .verification_token
        .as_deref()
        .ok_or_else(|| ApiError::internal("unverified user without verification token"))?;

    state.mailer.send_verification(&user.email, token).await?;

    tracing::info!(email = %user.email, "verification email re-sent");
    Ok(Json(MessageResponse::new("Verification email sent")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::auth::users::{NewUser, Subscription};
    use crate::server::test_support::test_state;
    use crate::server::AppState;

    async fn seed_unverified(state: &AppState, email: &str) -> String {
        let user = users::create_user(
            &state.pool,
            NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                subscription: Subscription::Starter,
                verification_token: uuid::Uuid::new_v4().to_string(),
                avatar_url: "x".to_string(),
            },
        )
        .await
        .unwrap();
        user.verification_token.unwrap()
    }

    #[tokio::test]
    async fn test_verify_email_marks_account_verified() {
        let state = test_state().await;
        let token = seed_unverified(&state, "v@x.com").await;

        let response = verify_email(State(state.clone()), Path(token.clone()))
            .await
            .unwrap();
        assert_eq!(response.message, "Verification successful");

        let user = users::find_by_email(&state.pool, "v@x.com")
            .await
            .unwrap()
            .unwrap();
        assert!(user.verified);

        // The token is single-use.
        let err = verify_email(State(state), Path(token)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_verify_unknown_token() {
        let state = test_state().await;
        let err = verify_email(State(state), Path("no-such-token".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resend_requires_email() {
        let state = test_state().await;
        let err = resend_verification(
            State(state),
            Json(ResendVerificationRequest { email: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resend_for_unknown_user() {
        let state = test_state().await;
        let err = resend_verification(
            State(state),
            Json(ResendVerificationRequest {
                email: Some("nobody@x.com".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resend_after_verification_is_rejected() {
        let state = test_state().await;
        let token = seed_unverified(&state, "done@x.com").await;
        verify_email(State(state.clone()), Path(token)).await.unwrap();

        let err = resend_verification(
            State(state),
            Json(ResendVerificationRequest {
                email: Some("done@x.com".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Verification has already been passed");
    }

    #[tokio::test]
    async fn test_resend_for_unverified_user_succeeds() {
        let state = test_state().await;
        seed_unverified(&state, "again@x.com").await;

        // mail transport is disabled in tests, so the send is a logged no-op
        let response = resend_verification(
            State(state),
            Json(ResendVerificationRequest {
                email: Some("again@x.com".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.message, "Verification email sent");
    }
}
