//! PocketBase client
//!
//! Only two operations are used: password auth against an auth collection,
//! and the token expiry check (done locally, the same way PocketBase's own
//! SDKs do it).

use super::{token, AuthResponse, IdentityBackend, IdentityError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct PocketBase {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    expiry_threshold_secs: i64,
}

#[derive(Serialize)]
struct PasswordAuthRequest<'a> {
    identity: &'a str,
    password: &'a str,
}

/// PocketBase error envelope: `{"code": 400, "message": "...", "data": {...}}`
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl PocketBase {
    pub fn new(base_url: &str, collection: &str, expiry_threshold_secs: i64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            expiry_threshold_secs,
        }
    }

    fn auth_url(&self) -> String {
        format!(
            "{}/api/collections/{}/auth-with-password",
            self.base_url, self.collection
        )
    }
}

#[async_trait]
impl IdentityBackend for PocketBase {
    async fn auth_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, IdentityError> {
        let response = self
            .client
            .post(self.auth_url())
            .json(&PasswordAuthRequest {
                identity: email,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<AuthResponse>().await?);
        }

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_default();
                Err(IdentityError::InvalidCredentials(message))
            }
            // 404 means the auth collection doesn't exist: a configuration
            // problem, not a bad password
            _ => Err(IdentityError::Unexpected(status.to_string())),
        }
    }

    async fn is_token_expired(&self, token: &str) -> Result<bool, IdentityError> {
        Ok(token::is_expired(token, self.expiry_threshold_secs)?)
    }
}
