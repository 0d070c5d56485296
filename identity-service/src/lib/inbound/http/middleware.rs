use std::str::FromStr;
use std::sync::Arc;

use auth::TokenIssuer;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Extension type carrying the verified caller identity into handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Middleware that validates the bearer token and stores the caller's
/// identity in request extensions. Absent, malformed, or expired tokens are
/// rejected with 401 before any handler runs.
pub async fn authenticate(
    State(token_issuer): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = token_issuer.verify_access(token).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        ApiError::Unauthorized("Invalid token format".to_string()).into_response()
    })?;

    let role = Role::from_str(&claims.role).map_err(|e| {
        tracing::error!("Failed to parse role from token: {}", e);
        ApiError::Unauthorized("Invalid token format".to_string()).into_response()
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id, role });

    Ok(next.run(req).await)
}

/// Permit the operation only for admins or the record's owner.
pub fn require_self_or_admin(
    caller: &AuthenticatedUser,
    target: &UserId,
) -> Result<(), ApiError> {
    if caller.role.is_admin() || caller.user_id == *target {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Access to this resource is not permitted".to_string(),
        ))
    }
}

/// Permit the operation only for admins.
pub fn require_admin(caller: &AuthenticatedUser) -> Result<(), ApiError> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Access to this resource is not permitted".to_string(),
        ))
    }
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    // strip_prefix, not trim_start_matches: the scheme must appear exactly
    // once, and any repetition stays part of the (invalid) token
    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })
}
