use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Persistence operations for the user aggregate.
///
/// Email and phone uniqueness must be enforced by the store itself (unique
/// constraints), not only by callers' existence checks: two concurrent
/// signups with the same email race, and exactly one may win.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PhoneAlreadyExists` - Phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by phone number.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserError>;

    /// Replace the stored token pair and bump `updated_at`.
    ///
    /// Keyed by user id with last-write-wins semantics; no version check.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_tokens(
        &self,
        id: &UserId,
        access_token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserError>;

    /// Retrieve one page of users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, UserError>;

    /// Total number of stored users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self) -> Result<u64, UserError>;
}
