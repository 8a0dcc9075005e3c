//! Server Module
//!
//! Process bootstrap pieces: configuration, shared state and app
//! initialization.

pub mod config;
pub mod init;
pub mod state;

#[cfg(test)]
pub mod test_support;

pub use config::Config;
pub use state::AppState;
