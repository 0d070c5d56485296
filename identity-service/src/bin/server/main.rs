use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::user::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // Missing database URL or JWT secret fails here, before anything binds
    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        access_ttl_hours = config.jwt.access_ttl_hours,
        refresh_ttl_hours = config.jwt.refresh_ttl_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_ttl_hours,
        config.jwt.refresh_ttl_hours,
    )?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let identity_service = Arc::new(IdentityService::new(
        user_repository,
        Arc::clone(&token_issuer),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        identity_service,
        token_issuer,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
