//! # Application State
//!
//! Shared state handed to every request handler. The service is stateless with
//! respect to sessions; the only shared resource is the identity backend client.

use crate::config::Config;
use crate::identity::{IdentityBackend, PocketBase};
use std::sync::Arc;

/// Shared application state
///
/// Axum clones this for each request, which only bumps the `Arc` count.
#[derive(Clone)]
pub struct AppState {
    /// Identity backend used for login and token expiry checks
    pub identity: Arc<dyn IdentityBackend>,
}

impl AppState {
    /// Build state backed by the PocketBase server named in `config`
    pub fn new(config: &Config) -> Self {
        let pocketbase = PocketBase::new(
            &config.pocketbase_url,
            &config.auth_collection,
            config.token_expiry_threshold_secs,
        );
        Self::with_backend(Arc::new(pocketbase))
    }

    pub fn with_backend(identity: Arc<dyn IdentityBackend>) -> Self {
        AppState { identity }
    }
}
