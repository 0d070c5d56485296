use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PageError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PhoneError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` always holds an Argon2 hash, never plaintext, and is
/// never serialized to clients. The token fields hold the most recently
/// issued pair; they are `None` only for records written before issuance.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password_hash: String,
    pub role: Role,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity claims for token issuance.
    pub fn identity(&self) -> auth::Identity {
        auth::Identity {
            user_id: self.id.to_string(),
            email: self.email.as_str().to_string(),
            first_name: self.first_name.as_str().to_string(),
            last_name: self.last_name.as_str().to_string(),
            role: self.role.as_str().to_string(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller role, controls access to other users' records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Wire form of the role ("ADMIN" / "USER").
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// Accepts an optional leading `+` followed by 7-15 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 15;

    /// Create a new validated phone number.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Digit count outside 7-15
    /// * `InvalidCharacters` - Non-digit characters present
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let digits = phone.strip_prefix('+').unwrap_or(&phone);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacters);
        }

        let count = digits.len();
        if count < Self::MIN_DIGITS {
            Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
                actual: count,
            })
        } else if count > Self::MAX_DIGITS {
            Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
                actual: count,
            })
        } else {
            Ok(Self(phone))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name value type for first/last names.
///
/// Non-blank, at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 64;

    /// Create a new validated name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace-only
    /// * `TooLong` - Name longer than 64 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        if name.trim().is_empty() {
            Err(NameError::Blank)
        } else if name.chars().count() > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: name.chars().count(),
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at signup, validated against policy before
/// hashing. Holds the plaintext only transiently.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Create a policy-checked password.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 8 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep plaintext out of debug output
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password: Password,
    pub role: Role,
}

/// Credentials presented at login.
///
/// The email is kept as a raw string: a malformed email can never match a
/// stored record, and rejecting it differently would leak which field was
/// wrong.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validated pagination window for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
    offset: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;

    /// Build a page request from optional query parameters.
    ///
    /// # Errors
    /// * `InvalidPage` - Page is zero
    /// * `InvalidLimit` - Limit is zero or above 100
    /// * `PageOutOfRange` - Page is so large the window start overflows
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Result<Self, PageError> {
        let page = page.unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if page == 0 {
            return Err(PageError::InvalidPage);
        }
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(PageError::InvalidLimit {
                max: Self::MAX_LIMIT,
            });
        }

        // Checked arithmetic: an extreme page value must become an error,
        // not a wrapped offset. The i64 bound keeps the offset representable
        // in SQL.
        let offset = page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(limit))
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or(PageError::PageOutOfRange)?;

        Ok(Self {
            page,
            limit,
            offset,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// One page of the user listing.
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}
