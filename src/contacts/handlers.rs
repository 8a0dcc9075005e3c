/**
 * Contact Endpoint Handlers
 *
 * CRUD over /api/contacts, all behind the auth middleware and all
 * scoped to the authenticated owner. A path id that is not a
 * well-formed UUID is answered 404, the same as an unknown one.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::handlers::types::MessageResponse;
use crate::contacts::db::{self, Contact, ContactFields, ListOptions};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;
use crate::validation::validate_contact;

/// Body of POST / and PUT /{id}; name is required, see the validator
#[derive(Debug, Deserialize, serde::Serialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

/// Body of PATCH /{id}/favorite; an absent flag means false
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub favorite: Option<bool>,
}

/// Query parameters of GET /
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub favorite: Option<bool>,
}

impl From<ListQuery> for ListOptions {
    fn from(query: ListQuery) -> Self {
        Self {
            page: query.page.unwrap_or(1).max(1),
            limit: query.limit.unwrap_or(20),
            favorite: query.favorite,
        }
    }
}

/// Mongo-style opaque ids became UUIDs; anything that does not parse
/// is indistinguishable from an id that does not exist.
fn parse_contact_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Not found"))
}

fn to_fields(validated: crate::validation::ValidatedContact) -> ContactFields {
    ContactFields {
        name: validated.name,
        email: validated.email,
        phone: validated.phone,
        favorite: validated.favorite,
    }
}

pub async fn list_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = db::list(&state.pool, user.id, query.into()).await?;
    Ok(Json(contacts))
}

pub async fn get_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_contact_id(&id)?;
    let contact = db::find(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;
    Ok(Json(contact))
}

pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let validated = validate_contact(&request)?;
    let contact = db::create(&state.pool, user.id, to_fields(validated)).await?;
    tracing::info!(owner = %user.id, contact = %contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn replace_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_contact_id(&id)?;
    let validated = validate_contact(&request)?;
    let contact = db::replace(&state.pool, user.id, id, to_fields(validated))
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;
    Ok(Json(contact))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_contact_id(&id)?;
    if !db::delete(&state.pool, user.id, id).await? {
        return Err(ApiError::not_found("Not found"));
    }
    tracing::info!(owner = %user.id, contact = %id, "contact deleted");
    Ok(Json(MessageResponse::new("contact deleted")))
}

pub async fn update_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<FavoriteRequest>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_contact_id(&id)?;
    let favorite = request.favorite.unwrap_or(false);
    let contact = db::set_favorite(&state.pool, user.id, id, favorite)
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;
    Ok(Json(contact))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_maps_to_not_found() {
        let err = parse_contact_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_list_query_defaults() {
        let options: ListOptions = ListQuery {
            page: None,
            limit: None,
            favorite: None,
        }
        .into();
        assert_eq!(options.page, 1);
        assert_eq!(options.limit, 20);
        assert!(options.favorite.is_none());
    }

    #[test]
    fn test_list_query_clamps_page_zero() {
        let options: ListOptions = ListQuery {
            page: Some(0),
            limit: Some(5),
            favorite: Some(true),
        }
        .into();
        assert_eq!(options.page, 1);
        assert_eq!(options.limit, 5);
        assert_eq!(options.favorite, Some(true));
    }
}
