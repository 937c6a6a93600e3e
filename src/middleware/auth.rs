use crate::identity::IdentityBackend;
use crate::session::{Session, COOKIE_NAME};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Path prefix gated by the session guard
pub const PROTECTED_PREFIX: &str = "/dashboard";

/// Where rejected requests are sent
pub const LOGIN_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect,
}

/// Decide whether a request may proceed
///
/// `cookie` is the raw `pb_auth` value, if the request carried one. Every
/// request is judged from its own cookie alone; nothing is remembered between
/// requests.
pub async fn decide(path: &str, cookie: Option<&str>, identity: &dyn IdentityBackend) -> Decision {
    if !path.starts_with(PROTECTED_PREFIX) {
        return Decision::Allow;
    }

    let Some(value) = cookie else {
        tracing::debug!(path, "no session cookie");
        return Decision::Redirect;
    };

    let token = match Session::decode(value) {
        Ok(session) if !session.token.is_empty() => session.token,
        Ok(_) => {
            tracing::debug!(path, "session cookie has empty token");
            return Decision::Redirect;
        }
        Err(e) => {
            tracing::debug!(path, error = %e, "unreadable session cookie");
            return Decision::Redirect;
        }
    };

    match identity.is_token_expired(&token).await {
        Ok(false) => Decision::Allow,
        Ok(true) => {
            tracing::debug!(path, "session token expired");
            Decision::Redirect
        }
        Err(e) => {
            tracing::debug!(path, error = %e, "could not check token expiry");
            Decision::Redirect
        }
    }
}

/// Middleware redirecting unauthenticated `/dashboard` requests to the login page
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let cookie = jar.get(COOKIE_NAME).map(|c| c.value());

    match decide(&path, cookie, state.identity.as_ref()).await {
        Decision::Allow => next.run(request).await,
        Decision::Redirect => Redirect::to(LOGIN_PATH).into_response(),
    }
}
