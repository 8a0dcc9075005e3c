//! In-process fixtures for handler unit tests: an in-memory SQLite pool
//! with migrations applied, wrapped in a throwaway `AppState`.

use std::path::PathBuf;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::server::config::Config;
use crate::server::state::AppState;

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        base_url: "http://localhost".to_string(),
        public_dir: PathBuf::from(std::env::temp_dir()),
        smtp: None,
    }
}

pub async fn test_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

pub async fn test_state() -> AppState {
    AppState::new(test_pool().await, test_config())
}
