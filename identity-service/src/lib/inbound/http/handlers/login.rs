use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn login<R: UserRepository>(
    State(state): State<AppState<R>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let credentials = Credentials {
        email: body.email,
        password: body.password,
    };

    state
        .identity_service
        .login(credentials)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// Full user record as returned to clients. The password hash is not part
/// of this type, so it can never leak into a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
            role: user.role.as_str().to_string(),
            access_token: user.access_token.clone(),
            refresh_token: user.refresh_token.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
