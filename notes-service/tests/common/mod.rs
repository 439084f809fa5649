use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::FixedClock;
use auth::TokenService;
use auth::TokenSettings;
use notes_service::config::DatabaseConfig;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::user::service::UserService;
use notes_service::inbound::http::router::create_router;
use notes_service::outbound::database;
use notes_service::outbound::repositories::SqliteNoteRepository;
use notes_service::outbound::repositories::SqliteUserRepository;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on a private in-memory database
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let pool = database::connect(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        database::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        let tokens =
            TokenService::new(TokenSettings::new(TEST_SECRET)).expect("Invalid token settings");
        let authenticator = Arc::new(Authenticator::new(tokens));

        let user_service = Arc::new(UserService::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::clone(&authenticator),
            Duration::from_secs(10),
        ));
        let note_service = Arc::new(NoteService::new(Arc::new(SqliteNoteRepository::new(
            pool,
        ))));

        let router = create_router(user_service, note_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Token signed with the server's secret but issued two hours in the past.
    pub fn expired_token(&self, user_id: i64) -> String {
        let clock = FixedClock::new(chrono::Utc::now().timestamp() - 2 * 3600);
        TokenService::with_clock(TokenSettings::new(TEST_SECRET), Arc::new(clock))
            .expect("Invalid token settings")
            .issue(user_id)
            .expect("Failed to issue token")
    }

    /// Well-formed token signed with a key the server does not know.
    pub fn foreign_token(&self, user_id: i64) -> String {
        TokenService::new(TokenSettings::new(
            b"another-secret-key-that-is-also-32-bytes-long".to_vec(),
        ))
        .expect("Invalid token settings")
        .issue(user_id)
        .expect("Failed to issue token")
    }

    /// Register a user and return the created user's id.
    pub async fn register(&self, email: &str, password: &str) -> i64 {
        let response = self
            .post("/api/auth/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("User id missing")
    }

    /// Log in and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Access token missing")
            .to_string()
    }

    /// Register and log in a fresh user, returning its id and token.
    pub async fn signed_in_user(&self, email: &str) -> (i64, String) {
        let id = self.register(email, "correct horse battery").await;
        let token = self.login(email, "correct horse battery").await;
        (id, token)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
