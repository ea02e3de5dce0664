//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::{Context, bail};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use merch::{MerchConfig, PgLedgerStore, merch_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,merch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", 10)?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let merch_config = load_merch_config()?;
    tracing::info!(
        token_ttl_secs = merch_config.token_ttl_secs(),
        starting_balance = merch_config.starting_balance,
        "Merch configuration loaded"
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/api", merch_router(PgLedgerStore::new(pool), merch_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env_or("SERVER_PORT", 8080)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the shop configuration from `MERCH_*` variables
fn load_merch_config() -> anyhow::Result<MerchConfig> {
    let secret = env::var("MERCH_TOKEN_SECRET")
        .ok()
        .filter(|value| !value.trim().is_empty());

    let mut config = match secret {
        Some(secret_b64) => {
            let secret_bytes = Engine::decode(&general_purpose::STANDARD, secret_b64.trim())
                .context("MERCH_TOKEN_SECRET must be valid base64")?;
            let Ok(secret) = <[u8; 32]>::try_from(secret_bytes.as_slice()) else {
                bail!(
                    "MERCH_TOKEN_SECRET must decode to 32 bytes (got {})",
                    secret_bytes.len()
                );
            };
            MerchConfig {
                token_secret: secret,
                ..MerchConfig::default()
            }
        }
        None if cfg!(debug_assertions) => {
            tracing::warn!("MERCH_TOKEN_SECRET not set, using a random secret");
            MerchConfig::development()
        }
        None => bail!("MERCH_TOKEN_SECRET must be set in production"),
    };

    config.token_ttl = Duration::from_secs(env_or("MERCH_TOKEN_TTL_SECS", 43_200)?);
    config.starting_balance = env_or("MERCH_STARTING_BALANCE", 0)?;

    if let Ok(pepper_b64) = env::var("MERCH_PASSWORD_PEPPER") {
        let pepper = Engine::decode(&general_purpose::STANDARD, pepper_b64.trim())
            .context("MERCH_PASSWORD_PEPPER must be valid base64")?;
        config.password_pepper = Some(pepper);
    }

    Ok(config)
}

/// Parse an environment variable, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {value:?}")),
        Err(_) => Ok(default),
    }
}
