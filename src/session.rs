//! # Session Cookie Codec
//!
//! The whole session lives in the browser: a single `pb_auth` cookie holding
//! `{"token": ..., "model": {...}}` as JSON. The server keeps nothing.
//!
//! Decoding is strict. A cookie that is not JSON, or that is missing either key,
//! is an error here; callers decide what an error means (the guard treats it as
//! "logged out").

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the session cookie
pub const COOKIE_NAME: &str = "pb_auth";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("malformed session cookie: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Authenticated browser session
///
/// `token` is opaque to this service. `model` is the user record exactly as the
/// identity backend returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub model: Map<String, Value>,
}

impl Session {
    pub fn new(token: impl Into<String>, model: Map<String, Value>) -> Self {
        Self {
            token: token.into(),
            model,
        }
    }

    pub fn encode(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(value: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(value)?)
    }

    /// Build the `pb_auth` cookie carrying this session
    ///
    /// No Max-Age: the cookie lives as long as the browser session, and the
    /// token's own expiry is what ends it server-side.
    pub fn to_cookie(&self) -> Result<Cookie<'static>, SessionError> {
        Ok(Cookie::build((COOKIE_NAME, self.encode()?))
            .secure(true)
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .build())
    }
}

/// Cookie identity to hand to [`CookieJar::remove`]
///
/// Path must match the one the cookie was set with or browsers keep it.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(COOKIE_NAME).path("/").build()
}

/// Read and decode the session from a request's cookie jar
///
/// `None` when the cookie is absent, `Some(Err(_))` when it is present but
/// unreadable.
pub fn from_jar(jar: &CookieJar) -> Option<Result<Session, SessionError>> {
    jar.get(COOKIE_NAME).map(|cookie| Session::decode(cookie.value()))
}
