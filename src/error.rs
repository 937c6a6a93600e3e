//! # Error Handling
//!
//! Handler-level error type and its conversion into HTTP responses.
//!
//! Login failures never reach this type: the login handler catches them and
//! re-renders the form. What ends up here are genuine server faults.

use crate::session::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A page that requires a session was rendered without one.
    ///
    /// The session guard runs before every `/dashboard` handler, so reaching
    /// this means the router was wired wrong.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Session could not be written to a cookie
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Page template failed to render
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NotLoggedIn => {
                tracing::error!("Protected page rendered without a session");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Rendering error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
