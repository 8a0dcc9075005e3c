//! Contactbook - Main Library
//!
//! Contactbook is a small REST backend: user accounts (registration,
//! email verification, login, avatar upload) and a per-user contact
//! list with pagination and a favorite flag, on top of SQLite via sqlx.
//!
//! # Module Structure
//!
//! - **`server`** - configuration, shared state, app initialization
//! - **`routes`** - route tree assembly
//! - **`middleware`** - bearer-token authentication
//! - **`auth`** - credential store, session tokens, user handlers
//! - **`contacts`** - owner-scoped contact store and handlers
//! - **`validation`** - request body validators
//! - **`avatar`** - gravatar defaults and the upload/resize pipeline
//! - **`email`** - verification mail dispatch
//! - **`error`** - the `ApiError` taxonomy and its JSON responses

pub mod auth;
pub mod avatar;
pub mod contacts;
pub mod email;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod validation;
