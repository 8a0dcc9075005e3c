/**
 * Contact Model and Database Operations
 *
 * The contact store. Every operation takes the owner id and scopes the
 * query to it, so a contact is only ever visible to and mutable by the
 * account it belongs to; a foreign id behaves exactly like an unknown
 * one.
 */

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// A contact row. Timestamps stay in the database and are never
/// serialized into API responses.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
}

/// Mutable contact fields, used for create and full replace
#[derive(Debug, Clone)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
}

/// Listing window: 1-indexed page, page size, optional favorite filter.
/// The filter applies only when the query parameter was explicitly
/// provided; an unfiltered listing returns every contact of the owner.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub page: u32,
    pub limit: u32,
    pub favorite: Option<bool>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            favorite: None,
        }
    }
}

impl ListOptions {
    fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

const CONTACT_COLUMNS: &str = "id, owner, name, email, phone, favorite";

/// List the owner's contacts in insertion order.
pub async fn list(
    pool: &SqlitePool,
    owner: Uuid,
    options: ListOptions,
) -> Result<Vec<Contact>, sqlx::Error> {
    match options.favorite {
        Some(favorite) => {
            sqlx::query_as::<_, Contact>(&format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts
                 WHERE owner = $1 AND favorite = $2
                 ORDER BY rowid LIMIT $3 OFFSET $4"
            ))
            .bind(owner)
            .bind(favorite)
            .bind(i64::from(options.limit))
            .bind(options.offset())
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Contact>(&format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts
                 WHERE owner = $1
                 ORDER BY rowid LIMIT $2 OFFSET $3"
            ))
            .bind(owner)
            .bind(i64::from(options.limit))
            .bind(options.offset())
            .fetch_all(pool)
            .await
        }
    }
}

/// Fetch one contact of the owner.
pub async fn find(
    pool: &SqlitePool,
    owner: Uuid,
    id: Uuid,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND owner = $2"
    ))
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

/// Insert a contact owned by `owner`.
pub async fn create(
    pool: &SqlitePool,
    owner: Uuid,
    fields: ContactFields,
) -> Result<Contact, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (id, owner, name, email, phone, favorite, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING id, owner, name, email, phone, favorite
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(fields.favorite)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Replace every mutable field of the owner's contact.
pub async fn replace(
    pool: &SqlitePool,
    owner: Uuid,
    id: Uuid,
    fields: ContactFields,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET name = $1, email = $2, phone = $3, favorite = $4, updated_at = $5
        WHERE id = $6 AND owner = $7
        RETURNING id, owner, name, email, phone, favorite
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(fields.favorite)
    .bind(Utc::now())
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

/// Delete the owner's contact; `false` when nothing matched.
pub async fn delete(pool: &SqlitePool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND owner = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Set only the favorite flag.
pub async fn set_favorite(
    pool: &SqlitePool,
    owner: Uuid,
    id: Uuid,
    favorite: bool,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET favorite = $1, updated_at = $2
        WHERE id = $3 AND owner = $4
        RETURNING id, owner, name, email, phone, favorite
        "#,
    )
    .bind(favorite)
    .bind(Utc::now())
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}
