/**
 * Application State
 *
 * `AppState` is the central state container handed to the router: the
 * SQLite pool, the immutable configuration and the mailer. Everything
 * in it is cheaply cloneable, so the whole struct is `Clone` and axum
 * clones it per request.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::email::Mailer;
use crate::server::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Process configuration, built once at startup
    pub config: Arc<Config>,
    /// Outgoing mail; a no-op when SMTP is not configured
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let mailer = Mailer::new(&config);
        Self {
            pool,
            config: Arc::new(config),
            mailer,
        }
    }
}

/// Allow handlers that only need the pool to extract `State<SqlitePool>`
impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
