use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::IdentityService;

/// Application state shared by all handlers.
///
/// Generic over the repository so the HTTP layer can be exercised against
/// test doubles without a database.
pub struct AppState<R>
where
    R: UserRepository,
{
    pub identity_service: Arc<IdentityService<R>>,
    pub token_issuer: Arc<TokenIssuer>,
}

// Manual impl: #[derive(Clone)] would require R: Clone
impl<R> Clone for AppState<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            identity_service: Arc::clone(&self.identity_service),
            token_issuer: Arc::clone(&self.token_issuer),
        }
    }
}

pub fn create_router<R>(
    identity_service: Arc<IdentityService<R>>,
    token_issuer: Arc<TokenIssuer>,
    request_timeout: Duration,
) -> Router
where
    R: UserRepository,
{
    let state = AppState {
        identity_service,
        token_issuer,
    };

    let public_routes = Router::new()
        .route("/users/signup", post(signup::<R>))
        .route("/users/login", post(login::<R>));

    // Every user-scoped route sits behind the token check, listing included
    let protected_routes = Router::new()
        .route("/users", get(list_users::<R>))
        .route("/users/:user_id", get(get_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.token_issuer.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        // Bounds all I/O a request performs; pending work is cancelled on expiry
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
