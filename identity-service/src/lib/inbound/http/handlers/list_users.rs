use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::get_user::GetUserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UserPage;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::middleware::require_admin;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_users<R: UserRepository>(
    State(state): State<AppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    require_admin(&caller)?;

    let page = PageRequest::new(query.page, query.limit)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .identity_service
        .list_users(page)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListUsersQuery {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub users: Vec<GetUserResponseData>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

impl From<&UserPage> for ListUsersResponseData {
    fn from(page: &UserPage) -> Self {
        Self {
            users: page.users.iter().map(Into::into).collect(),
            page: page.page,
            limit: page.limit,
            total: page.total,
        }
    }
}
