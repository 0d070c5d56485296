use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;

/// Identity fields embedded in issued access tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// An access/refresh token pair from a single issuance.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates signed session tokens.
///
/// Every issuance produces two independently signed tokens: a short-lived
/// access token carrying full identity claims and a long-lived refresh token
/// carrying only the subject.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    access_ttl_hours: i64,
    refresh_ttl_hours: i64,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `secret` - Secret key for HS256 signing
    /// * `access_ttl_hours` - Access token lifetime
    /// * `refresh_ttl_hours` - Refresh token lifetime
    ///
    /// # Errors
    /// * `InvalidLifetime` - Refresh lifetime is shorter than access lifetime
    pub fn new(
        secret: &[u8],
        access_ttl_hours: i64,
        refresh_ttl_hours: i64,
    ) -> Result<Self, JwtError> {
        if refresh_ttl_hours < access_ttl_hours {
            return Err(JwtError::InvalidLifetime {
                access_hours: access_ttl_hours,
                refresh_hours: refresh_ttl_hours,
            });
        }

        Ok(Self {
            jwt_handler: JwtHandler::new(secret),
            access_ttl_hours,
            refresh_ttl_hours,
        })
    }

    /// Issue a fresh token pair for an identity.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, JwtError> {
        let access_claims = AccessClaims::new(
            &identity.user_id,
            &identity.email,
            &identity.first_name,
            &identity.last_name,
            &identity.role,
            self.access_ttl_hours,
        );
        let refresh_claims = RefreshClaims::new(&identity.user_id, self.refresh_ttl_hours);

        let access_token = self.jwt_handler.encode(&access_claims)?;
        let refresh_token = self.jwt_handler.encode(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `DecodingFailed` - Signature is invalid or token is malformed
    /// * `WrongTokenType` - Token was not issued as an access token
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let claims: AccessClaims = self.jwt_handler.decode(token)?;
        if claims.typ != AccessClaims::TOKEN_TYPE {
            return Err(JwtError::WrongTokenType {
                expected: AccessClaims::TOKEN_TYPE,
            });
        }
        Ok(claims)
    }

    /// Validate a refresh token and return its claims.
    ///
    /// An access token would deserialize here too (its claims are a
    /// superset), so the type discriminator is checked explicitly.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `DecodingFailed` - Signature is invalid or token is malformed
    /// * `WrongTokenType` - Token was not issued as a refresh token
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        let claims: RefreshClaims = self.jwt_handler.decode(token)?;
        if claims.typ != RefreshClaims::TOKEN_TYPE {
            return Err(JwtError::WrongTokenType {
                expected: RefreshClaims::TOKEN_TYPE,
            });
        }
        Ok(claims)
    }
}
