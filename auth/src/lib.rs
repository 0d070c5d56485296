//! Authentication building blocks for the identity service.
//!
//! - Password hashing (Argon2id)
//! - JWT encoding and validation (HS256)
//! - Access/refresh token pair issuance
//!
//! The service defines its own domain types and adapts these primitives;
//! nothing in this crate knows about users, stores, or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Token Issuance
//! ```
//! use auth::{Identity, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", 24, 168).unwrap();
//! let identity = Identity {
//!     user_id: "user123".to_string(),
//!     email: "a@example.com".to_string(),
//!     first_name: "A".to_string(),
//!     last_name: "B".to_string(),
//!     role: "USER".to_string(),
//! };
//! let pair = issuer.issue(&identity).unwrap();
//! let claims = issuer.verify_access(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::Identity;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
