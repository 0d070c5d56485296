use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::DateTime;
use chrono::Utc;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory repository standing in for Postgres.
///
/// Enforces the same email/phone uniqueness the database constraints do, so
/// conflict paths behave like production.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if users.iter().any(|u| u.phone == user.phone) {
            return Err(UserError::PhoneAlreadyExists(
                user.phone.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.phone.as_str() == phone).cloned())
    }

    async fn update_tokens(
        &self,
        id: &UserId,
        access_token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.access_token = Some(access_token.to_string());
        user.refresh_token = Some(refresh_token.to_string());
        user.updated_at = updated_at;
        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, UserError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, UserError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_issuer: Arc<TokenIssuer>,
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

        let repository = Arc::new(InMemoryUserRepository::new());
        let token_issuer =
            Arc::new(TokenIssuer::new(JWT_SECRET, 24, 168).expect("Failed to create issuer"));

        let identity_service = Arc::new(IdentityService::new(
            Arc::clone(&repository),
            Arc::clone(&token_issuer),
        ));

        let router = create_router(
            identity_service,
            Arc::clone(&token_issuer),
            Duration::from_secs(100),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            token_issuer,
            api_client: reqwest::Client::new(),
        }
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

    /// Register a user and return the created id.
    pub async fn signup(&self, email: &str, phone: &str, role: &str) -> String {
        let response = self
            .post("/users/signup")
            .json(&serde_json::json!({
                "first_name": "Test",
                "last_name": "User",
                "email": email,
                "password": "pass_word!",
                "phone": phone,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute signup request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("Missing id").to_string()
    }

    /// Log a user in and return the access token from the response body.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post("/users/login")
            .json(&serde_json::json!({
                "email": email,
                "password": "pass_word!"
            }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
