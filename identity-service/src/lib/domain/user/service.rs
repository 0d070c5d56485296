use std::sync::Arc;

use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPage;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Domain service for signup, login, and profile lookups.
///
/// Stateless across requests; every operation performs its own sequential
/// store round-trips through the injected repository.
pub struct IdentityService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: auth::PasswordHasher,
}

impl<R> IdentityService<R>
where
    R: UserRepository,
{
    /// Create a new identity service with injected dependencies.
    pub fn new(repository: Arc<R>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Register a new user.
    ///
    /// Checks email then phone for duplicates and returns the conflict
    /// immediately, before hashing or inserting anything. The store's
    /// unique constraints backstop the check under concurrent signups.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` - Duplicate unique field
    /// * `Password` - Hashing failed
    /// * `Token` - Signing failed
    /// * `DatabaseError` - Store operation failed
    pub async fn signup(&self, command: SignupCommand) -> Result<User, UserError> {
        if let Some(existing) = self.repository.find_by_email(command.email.as_str()).await? {
            return Err(UserError::EmailAlreadyExists(existing.email.to_string()));
        }

        if let Some(existing) = self.repository.find_by_phone(command.phone.as_str()).await? {
            return Err(UserError::PhoneAlreadyExists(
                existing.phone.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let now = Utc::now();
        let mut user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            password_hash,
            role: command.role,
            access_token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        let pair = self.token_issuer.issue(&user.identity())?;
        user.access_token = Some(pair.access_token);
        user.refresh_token = Some(pair.refresh_token);

        let created = self.repository.create(user).await?;

        tracing::info!(user_id = %created.id, role = %created.role, "User registered");

        Ok(created)
    }

    /// Verify credentials, rotate the stored token pair, and return the
    /// refreshed record.
    ///
    /// Unknown email and wrong password produce the identical
    /// `InvalidCredentials` error so responses never reveal which field
    /// was wrong.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or password mismatch
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Signing failed
    /// * `DatabaseError` - Store operation failed
    pub async fn login(&self, credentials: Credentials) -> Result<User, UserError> {
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let matches = self
            .password_hasher
            .verify(&credentials.password, &user.password_hash)?;
        if !matches {
            return Err(UserError::InvalidCredentials);
        }

        let pair = self.token_issuer.issue(&user.identity())?;
        self.repository
            .update_tokens(&user.id, &pair.access_token, &pair.refresh_token, Utc::now())
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        // Return the record as persisted, tokens included
        self.repository
            .find_by_id(&user.id)
            .await?
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))
    }

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    /// Retrieve one page of users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    pub async fn list_users(&self, page: PageRequest) -> Result<UserPage, UserError> {
        let users = self.repository.list(page.offset(), page.limit()).await?;
        let total = self.repository.count().await?;

        Ok(UserPage {
            users,
            page: page.page(),
            limit: page.limit(),
            total,
        })
    }
}
