//! # Page Handlers
//!
//! Server-rendered HTML pages. Templates live in `templates/` and are
//! auto-escaped by askama, so backend data can be embedded as-is.

use crate::error::{AppError, AppResult};
use crate::session::{self, SessionError};
use askama::Template;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    /// Message shown above the form after a failed attempt
    pub error: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage {
    /// Pretty-printed user record
    record: String,
}

/// Login form
///
/// ## Route
/// GET /
pub async fn login_page() -> AppResult<Html<String>> {
    Ok(Html(LoginPage { error: None }.render()?))
}

/// Protected dashboard showing the logged-in user's record
///
/// ## Route
/// GET /dashboard
///
/// The session guard has already checked the cookie before this runs. A
/// missing or unreadable session here is a wiring bug, not a user error.
pub async fn dashboard(jar: CookieJar) -> AppResult<Html<String>> {
    let session = match session::from_jar(&jar) {
        Some(Ok(session)) => session,
        _ => return Err(AppError::NotLoggedIn),
    };

    let record = serde_json::to_string_pretty(&session.model).map_err(SessionError::from)?;

    Ok(Html(DashboardPage { record }.render()?))
}
