//! Shared integration-test fixtures
//!
//! Boots the full router against an in-memory SQLite database and a
//! throwaway public directory, and provides helpers for the common
//! signup -> verify -> login dance.

use std::path::PathBuf;

use axum_test::TestServer;
use contactbook::routes;
use contactbook::server::{AppState, Config};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    // held for its Drop; the directory disappears with the fixture
    #[allow(dead_code)]
    pub public_dir: tempfile::TempDir,
}

pub async fn spawn_app() -> TestApp {
    // One connection keeps all queries on the same in-memory database.
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

    let public_dir = tempfile::tempdir().expect("create public dir");

    let config = Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        base_url: "http://localhost".to_string(),
        public_dir: PathBuf::from(public_dir.path()),
        smtp: None,
    };

    let state = AppState::new(pool.clone(), config);
    let server = TestServer::new(routes::app(state)).expect("start test server");

    TestApp {
        server,
        pool,
        public_dir,
    }
}

impl TestApp {
    /// The verification token the signup flow stored for `email`.
    pub async fn verification_token(&self, email: &str) -> String {
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT verification_token FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .expect("user exists")
        .expect("user has a verification token")
    }

    /// The stored id of the user registered as `email`.
    pub async fn user_id(&self, email: &str) -> uuid::Uuid {
        sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("user exists")
    }

    /// Register an account with the given email and password "123456".
    pub async fn signup(&self, email: &str) {
        let response = self
            .server
            .post("/api/users/signup")
            .json(&serde_json::json!({ "email": email, "password": "123456" }))
            .await;
        assert_eq!(response.status_code().as_u16(), 201, "signup failed");
    }

    /// Verify the account through the emailed-token endpoint.
    pub async fn verify(&self, email: &str) {
        let token = self.verification_token(email).await;
        let response = self.server.get(&format!("/api/users/verify/{token}")).await;
        assert_eq!(response.status_code().as_u16(), 200, "verification failed");
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .server
            .post("/api/users/login")
            .json(&serde_json::json!({ "email": email, "password": "123456" }))
            .await;
        assert_eq!(response.status_code().as_u16(), 200, "login failed");
        let body: serde_json::Value = response.json();
        body["token"].as_str().expect("token in response").to_string()
    }

    /// Full signup -> verify -> login flow, returning the bearer token.
    pub async fn register_and_login(&self, email: &str) -> String {
        self.signup(email).await;
        self.verify(email).await;
        self.login(email).await
    }

    /// Create a contact for the bearer of `token` and return its body.
    pub async fn create_contact(&self, token: &str, name: &str) -> serde_json::Value {
        let response = self
            .server
            .post("/api/contacts")
            .authorization_bearer(token)
            .json(&serde_json::json!({ "name": name }))
            .await;
        assert_eq!(response.status_code().as_u16(), 201, "contact create failed");
        response.json()
    }
}
