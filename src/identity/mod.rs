//! # Identity Backend
//!
//! Everything about credentials and tokens is delegated to an external identity
//! service. This module defines the seam the rest of the app talks to.
//!
//! ## Submodules
//! - `pocketbase`: HTTP client for a PocketBase server
//! - `token`: local expiry check on PocketBase-issued tokens
//!
//! ## What the backend owns
//! 1. Verifying an e-mail/password pair and issuing a token
//! 2. Deciding whether a token is still good
//!
//! We never look inside the token beyond the expiry predicate, and we never
//! revoke tokens: logging out only forgets the cookie.

pub mod pocketbase;
pub mod token;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub use pocketbase::PocketBase;

/// Successful password authentication
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token
    pub token: String,
    /// User record as stored by the backend
    pub record: Map<String, Value>,
}

#[derive(Error, Debug)]
pub enum IdentityError {
    /// The backend rejected the e-mail/password pair
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The backend could not be reached or its reply could not be read
    #[error("identity backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with something we don't understand
    #[error("unexpected identity backend response: {0}")]
    Unexpected(String),

    #[error("malformed token: {0}")]
    MalformedToken(#[from] token::TokenError),
}

/// External identity service
///
/// Object-safe so the app state can hold an `Arc<dyn IdentityBackend>` and
/// tests can swap in an in-memory backend.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn auth_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, IdentityError>;

    /// `Err` means validity could not be established; callers must not treat
    /// that as valid.
    async fn is_token_expired(&self, token: &str) -> Result<bool, IdentityError>;
}
