use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims embedded in an access token.
///
/// Carries the caller's full identity so protected endpoints can make
/// authorization decisions without a store round-trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,
    /// Token type discriminator, always [`AccessClaims::TOKEN_TYPE`]
    pub typ: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Role string, e.g. "ADMIN" or "USER"
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims embedded in a refresh token.
///
/// Deliberately subject-only: enough to mint a new access token for the
/// user, without duplicating identity fields in a long-lived credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    pub sub: String,
    /// Token type discriminator, always [`RefreshClaims::TOKEN_TYPE`]
    pub typ: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub const TOKEN_TYPE: &'static str = "access";

    /// Build access claims expiring `ttl_hours` from now.
    pub fn new(
        sub: impl ToString,
        email: impl ToString,
        first_name: impl ToString,
        last_name: impl ToString,
        role: impl ToString,
        ttl_hours: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.to_string(),
            typ: Self::TOKEN_TYPE.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
        }
    }
}

impl RefreshClaims {
    pub const TOKEN_TYPE: &'static str = "refresh";

    /// Build refresh claims expiring `ttl_hours` from now.
    pub fn new(sub: impl ToString, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.to_string(),
            typ: Self::TOKEN_TYPE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
        }
    }
}
