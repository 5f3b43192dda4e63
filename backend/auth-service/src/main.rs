/// Auth Service Main Entry Point
///
/// Starts the HTTP server with:
/// - PostgreSQL connection pool + embedded migrations
/// - Redis connection manager
/// - Email transport (SMTP or no-op)
/// - Graceful shutdown on Ctrl+C/SIGTERM
use anyhow::{Context, Result};
use auth_service::config::Settings;
use auth_service::http::{build_router, AppState};
use auth_service::security::TokenKeys;
use auth_service::services::{AuthService, EmailService, UserService};
use redis_utils::RedisPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "auth_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("starting auth service");

    let settings = Settings::load().context("failed to load configuration")?;
    info!("configuration loaded");

    // statement_timeout bounds every query server-side, matching the cache
    // operation deadline
    let connect_options = PgConnectOptions::from_str(&settings.database.url)
        .context("invalid DATABASE_URL")?
        .options([("statement_timeout", "5s")]);

    let db_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout))
        .connect_with(connect_options)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!(
        "database pool initialized with {} max connections",
        settings.database.max_connections
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("failed to run database migrations")?;
    info!("database migrations completed");

    let redis_pool = RedisPool::connect(&settings.redis.url)
        .await
        .context("failed to connect to Redis")?;
    let cache = redis_pool.manager();
    info!("redis connection manager initialized");

    let email = EmailService::new(&settings.email).context("failed to initialize email service")?;
    if email.is_enabled() {
        info!("email service initialized with SMTP");
    } else {
        info!("email service running in no-op mode (SMTP not configured)");
    }

    let tokens = TokenKeys::from_settings(&settings.tokens);

    let state = AppState {
        auth: AuthService::new(db_pool.clone(), cache, email, tokens),
        users: UserService::new(db_pool),
    };

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind listen address")?;
    info!("listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("auth service shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C signal");
        },
        _ = terminate => {
            info!("received SIGTERM signal");
        },
    }

    info!("shutting down gracefully...");
}
