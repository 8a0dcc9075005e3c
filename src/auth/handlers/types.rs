/**
 * Authentication Handler Types
 *
 * Request and response DTOs for the user endpoints. Request fields are
 * all optional so that a missing field reaches the validation layer
 * (which answers 400 naming the field) instead of axum's generic
 * deserialization rejection.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::{Subscription, User};

/// Signup request body
#[derive(Debug, Deserialize, Serialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// One of starter/pro/business; defaults to starter
    pub subscription: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of PATCH /api/users
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateSubscriptionRequest {
    pub subscription: Option<String>,
}

/// Body of POST /api/users/verify
#[derive(Debug, Deserialize, Serialize)]
pub struct ResendVerificationRequest {
    pub email: Option<String>,
}

/// Public view of an account, embedded in signup/login/current responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub email: String,
    pub subscription: Subscription,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            subscription: user.subscription,
        }
    }
}

/// 201 body for signup
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserPayload,
}

/// 200 body for login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPayload,
}

/// 200 body for GET /api/users/current
#[derive(Debug, Serialize)]
pub struct CurrentResponse {
    pub user: UserPayload,
}

/// Plain confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 200 body for PATCH /api/users/avatars
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}
