use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::Role;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PhoneError;
use crate::user::errors::RoleError;

pub async fn signup<R: UserRepository>(
    State(state): State<AppState<R>>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    state
        .identity_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    phone: String,
    role: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid first name: {0}")]
    FirstName(NameError),

    #[error("Invalid last name: {0}")]
    LastName(NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let first_name =
            PersonName::new(self.first_name).map_err(ParseSignupRequestError::FirstName)?;
        let last_name =
            PersonName::new(self.last_name).map_err(ParseSignupRequestError::LastName)?;
        let email = EmailAddress::new(self.email)?;
        let phone = PhoneNumber::new(self.phone)?;
        let password = Password::new(self.password)?;
        let role = Role::from_str(&self.role)?;

        Ok(SignupCommand {
            first_name,
            last_name,
            email,
            phone,
            password,
            role,
        })
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Acknowledgment of the created record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SignupResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            created_at: user.created_at,
        }
    }
}
