//! Error Module
//!
//! Defines the error taxonomy used across the HTTP layer and its
//! conversion into JSON responses.
//!
//! - **`types`** - `ApiError` definition and constructors
//! - **`conversion`** - `IntoResponse` implementation

pub mod conversion;
pub mod types;

pub use types::ApiError;
