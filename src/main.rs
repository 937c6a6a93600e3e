//! # pocketgate
//!
//! A small authentication gate in front of a PocketBase identity backend:
//! a login form, a cookie-held session, and a protected dashboard.
//!
//! ## Key Concepts
//! - **Stateless sessions**: the token and user record live in the `pb_auth`
//!   cookie; the server stores nothing
//! - **Delegated identity**: PocketBase verifies passwords and issues tokens
//! - **Session guard**: every `/dashboard` request must carry an unexpired token

mod config;      // Configuration management (environment variables)
mod error;       // Error handling and custom error types
mod handlers;    // HTTP request handlers (pages, login/logout, health)
mod identity;    // Identity backend seam and PocketBase client
mod middleware;  // Session guard
mod routes;      // Router assembly
mod session;     // Session cookie codec
mod state;       // Shared application state

use crate::config::Config;
use crate::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Builds the PocketBase-backed application state
/// 4. Starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for our app
    // Can be overridden with RUST_LOG environment variable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pocketgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config);
    tracing::info!("Using PocketBase at {}", config.pocketbase_url);

    let app = routes::router(app_state, &config.static_dir);

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
