//! Contacts Module
//!
//! The per-user contact list: owner-scoped store operations and the
//! `/api/contacts` handlers.

pub mod db;
pub mod handlers;
