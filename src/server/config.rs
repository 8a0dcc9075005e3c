/**
 * Server Configuration
 *
 * Configuration is read from the environment exactly once, at process
 * start, into an explicit `Config` struct that is then passed into each
 * component's constructor. No component reads environment variables on
 * its own.
 *
 * # Variables
 *
 * - `SERVER_PORT` - listen port (default 3000)
 * - `DATABASE_URL` - SQLite connection string (default `sqlite:contactbook.db`)
 * - `JWT_SECRET` - HMAC secret for session tokens (required)
 * - `BASE_URL` - public base URL used in verification links
 * - `PUBLIC_DIR` - directory served statically; avatars land in `<PUBLIC_DIR>/avatars`
 * - `SMTP_HOST` / `SMTP_USERNAME` / `SMTP_PASSWORD` / `SMTP_FROM` - mail
 *   transport; when `SMTP_HOST` is unset the mailer is disabled and
 *   verification mails are logged instead of sent
 */

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that prevent startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// SMTP transport settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Contactbook <no-reply@contactbook.dev>`
    pub from: String,
}

/// Process-wide configuration, built once in `main`
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub base_url: String,
    pub public_dir: PathBuf,
    /// `None` disables outgoing mail
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Only `JWT_SECRET` is strictly required; everything else has a
    /// local-development default. SMTP settings are all-or-nothing: if
    /// `SMTP_HOST` is set, the username, password and sender must be too.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "SERVER_PORT",
                value: raw,
            })?,
            Err(_) => 3000,
        };

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:contactbook.db".to_string());

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let public_dir = std::env::var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => Some(SmtpConfig {
                host,
                username: std::env::var("SMTP_USERNAME")
                    .map_err(|_| ConfigError::MissingVar("SMTP_USERNAME"))?,
                password: std::env::var("SMTP_PASSWORD")
                    .map_err(|_| ConfigError::MissingVar("SMTP_PASSWORD"))?,
                from: std::env::var("SMTP_FROM")
                    .map_err(|_| ConfigError::MissingVar("SMTP_FROM"))?,
            }),
            Err(_) => {
                tracing::warn!("SMTP_HOST not set; outgoing mail is disabled");
                None
            }
        };

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            base_url,
            public_dir,
            smtp,
        })
    }
}
