//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! Configuration comes from the environment, with an optional `.env` file for
//! local development.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `POCKETBASE_URL`: Base URL of the PocketBase server
//! - `AUTH_COLLECTION`: PocketBase auth collection to log into (default: users)
//! - `TOKEN_EXPIRY_THRESHOLD_SECS`: Treat tokens as expired this many seconds early
//! - `STATIC_DIR`: Directory served for static assets (default: static)

use anyhow::{Context, Result};
use std::env;

/// Application configuration
///
/// All fields are public for easy access from other modules.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number
    pub port: u16,

    /// PocketBase base URL, without trailing slash
    /// For local development: "http://127.0.0.1:8090"
    pub pocketbase_url: String,

    /// Name of the PocketBase auth collection holding user accounts
    pub auth_collection: String,

    /// Seconds before `exp` at which a token already counts as expired
    pub token_expiry_threshold_secs: i64,

    /// Directory of static assets (stylesheet)
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults. Variables that are set but
    /// don't parse are an error.
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=8080
    /// POCKETBASE_URL=http://127.0.0.1:8090
    /// AUTH_COLLECTION=users
    /// TOKEN_EXPIRY_THRESHOLD_SECS=0
    /// ```
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (dotenvy doesn't error if file missing)
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            pocketbase_url: env::var("POCKETBASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8090".to_string())
                .trim_end_matches('/')
                .to_string(),

            auth_collection: env::var("AUTH_COLLECTION").unwrap_or_else(|_| "users".to_string()),

            token_expiry_threshold_secs: env::var("TOKEN_EXPIRY_THRESHOLD_SECS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .context("TOKEN_EXPIRY_THRESHOLD_SECS must be an integer")?,

            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Example: "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
