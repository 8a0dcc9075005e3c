/**
 * Server Initialization
 *
 * Connects the database, runs embedded migrations, prepares the public
 * avatar directory and assembles the router. `main` only has to bind a
 * listener and serve the returned app.
 */

use std::str::FromStr;

use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::routes;
use crate::server::config::Config;
use crate::server::state::AppState;

/// Connect to the database named in `config` and run migrations.
pub async fn connect_database(config: &Config) -> Result<SqlitePool, ApiError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(ApiError::Database)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    tracing::info!("database connection pool created");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| ApiError::internal(format!("migrations failed: {e}")))?;
    tracing::info!("database migrations completed");

    Ok(pool)
}

/// Build the application: pool, state, routes.
pub async fn create_app(config: Config) -> Result<Router, ApiError> {
    let pool = connect_database(&config).await?;

    let avatar_dir = config.public_dir.join("avatars");
    tokio::fs::create_dir_all(&avatar_dir).await?;

    let state = AppState::new(pool, config);
    Ok(routes::app(state))
}
