/**
 * User Model and Database Operations
 *
 * The credential store: user rows plus the sqlx operations the handlers
 * compose. Passwords only ever enter this module as bcrypt hashes, and
 * the serialized form of `User` never includes the hash, the session
 * token or the verification token.
 */

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Subscription tier attached to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Subscription {
    Starter,
    Pro,
    Business,
}

impl Subscription {
    /// All accepted wire values, used in validation error messages
    pub const VALUES: [&'static str; 3] = ["starter", "pro", "business"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Business => "business",
        }
    }
}

impl std::str::FromStr for Subscription {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Self::Starter),
            "pro" => Ok(Self::Pro),
            "business" => Ok(Self::Business),
            _ => Err(()),
        }
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::Starter
    }
}

/// A user row.
///
/// Serialization skips every credential field; `avatar_url` is exposed
/// as `avatarURL` to match the public API shape.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub subscription: Subscription,
    /// Single-slot session token; `None` means logged out
    #[serde(skip)]
    pub token: Option<String>,
    /// One-time email verification token; `None` once verified
    #[serde(skip)]
    pub verification_token: Option<String>,
    pub verified: bool,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

/// Fields required to create a user
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub subscription: Subscription,
    pub verification_token: String,
    pub avatar_url: String,
}

const USER_COLUMNS: &str =
    "id, email, password_hash, subscription, token, verification_token, verified, avatar_url";

/// Insert a new, unverified user.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, subscription, token, verification_token, verified, avatar_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NULL, $5, FALSE, $6, $7, $7)
        RETURNING id, email, password_hash, subscription, token, verification_token, verified, avatar_url
        "#,
    )
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.subscription)
    .bind(&new_user.verification_token)
    .bind(&new_user.avatar_url)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Look up a user by email.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Look up a user by id.
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Look up a user by their one-time verification token.
pub async fn find_by_verification_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE verification_token = $1"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Overwrite the session token slot. `None` logs the user out.
pub async fn set_session_token(
    pool: &SqlitePool,
    id: Uuid,
    token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET token = $1, updated_at = $2 WHERE id = $3")
        .bind(token)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Mark the account verified and clear the verification token.
pub async fn set_verified(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET verified = TRUE, verification_token = NULL, updated_at = $1 WHERE id = $2",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Update only the subscription tier.
pub async fn set_subscription(
    pool: &SqlitePool,
    id: Uuid,
    subscription: Subscription,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET subscription = $1, updated_at = $2 WHERE id = $3
        RETURNING id, email, password_hash, subscription, token, verification_token, verified, avatar_url
        "#,
    )
    .bind(subscription)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Replace the avatar URL.
pub async fn set_avatar_url(
    pool: &SqlitePool,
    id: Uuid,
    avatar_url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET avatar_url = $1, updated_at = $2 WHERE id = $3")
        .bind(avatar_url)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
