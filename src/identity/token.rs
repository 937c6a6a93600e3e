//! Local expiry check for PocketBase auth tokens
//!
//! PocketBase tokens are JWTs. The only thing we ever read from one is the
//! `exp` claim; signature verification is the backend's job.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is not a JSON object")]
    NotAnObject,

    #[error("token exp claim is not a number")]
    InvalidExp,
}

/// Whether `token` is expired right now
///
/// `threshold_secs` treats tokens as expired that many seconds early.
pub fn is_expired(token: &str, threshold_secs: i64) -> Result<bool, TokenError> {
    is_expired_at(token, threshold_secs, Utc::now().timestamp())
}

pub fn is_expired_at(token: &str, threshold_secs: i64, now: i64) -> Result<bool, TokenError> {
    let claims = payload(token)?;

    match exp_claim(claims.get("exp"))? {
        // Non-expiring token
        None => Ok(false),
        Some(exp) => Ok(exp - threshold_secs as f64 <= now as f64),
    }
}

/// Numeric value of `exp`, or `None` when the token carries no expiry
///
/// Mirrors the PocketBase SDKs: a falsy claim (absent, null, false, 0, "")
/// never expires and a numeric string counts as its number.
fn exp_claim(exp: Option<&Value>) -> Result<Option<f64>, TokenError> {
    let exp = match exp {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().ok_or(TokenError::InvalidExp)?,
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| TokenError::InvalidExp)?,
        Some(_) => return Err(TokenError::InvalidExp),
    };

    if exp == 0.0 {
        Ok(None)
    } else {
        Ok(Some(exp))
    }
}

fn payload(token: &str) -> Result<Map<String, Value>, TokenError> {
    let segment = token.split('.').nth(1).ok_or(TokenError::MissingPayload)?;
    let bytes = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))?;

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(claims)) if !claims.is_empty() => Ok(claims),
        _ => Err(TokenError::NotAnObject),
    }
}

/// Build an unsigned JWT-shaped token with the given claims
#[cfg(test)]
pub(crate) fn forge(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}
