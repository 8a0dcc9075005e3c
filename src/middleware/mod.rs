//! Middleware Module
//!
//! Request-level middleware; currently just bearer-token authentication.

pub mod auth;

pub use auth::{authenticate, AuthUser};
