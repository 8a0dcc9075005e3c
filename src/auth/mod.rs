//! Auth Module
//!
//! User accounts: the credential store, session tokens and the HTTP
//! handlers for the `/api/users` routes.

pub mod handlers;
pub mod sessions;
pub mod users;
