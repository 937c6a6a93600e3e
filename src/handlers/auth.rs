use crate::error::AppResult;
use crate::handlers::pages::LoginPage;
use crate::identity::IdentityError;
use crate::session::{self, Session};
use crate::state::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

/// Login form submission
///
/// Missing fields deserialize as empty so they hit validation instead of a
/// form rejection.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Log in with e-mail and password
///
/// ## Route
/// POST /login
///
/// ## Flow
/// 1. Reject blank fields without calling the backend
/// 2. Authenticate against the identity backend
/// 3. Store `{token, model}` in the `pb_auth` cookie
/// 4. Redirect to `/dashboard`
///
/// Any backend failure re-renders the login form with an error; no cookie is
/// set and the submitted credentials are not echoed back.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.email.trim().is_empty() || form.password.trim().is_empty() {
        return login_failed(
            StatusCode::UNPROCESSABLE_ENTITY,
            "E-mail and password are required",
        );
    }

    match state
        .identity
        .auth_with_password(&form.email, &form.password)
        .await
    {
        Ok(auth) => {
            let session = Session::new(auth.token, auth.record);
            tracing::info!(user_id = ?session.model.get("id"), "Login succeeded");

            let jar = jar.add(session.to_cookie()?);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(IdentityError::InvalidCredentials(message)) => {
            tracing::warn!("Login rejected by identity backend: {}", message);
            login_failed(StatusCode::UNAUTHORIZED, "Invalid e-mail or password")
        }
        Err(e) => {
            tracing::error!("Identity backend failure during login: {:?}", e);
            login_failed(
                StatusCode::BAD_GATEWAY,
                "Authentication service unavailable, please try again",
            )
        }
    }
}

fn login_failed(status: StatusCode, message: &'static str) -> AppResult<Response> {
    let page = LoginPage {
        error: Some(message),
    };
    Ok((status, Html(page.render()?)).into_response())
}

/// Forget the session and go back to the login page
///
/// ## Route
/// POST /logout
///
/// Client-side only: the token is not revoked at the backend and stays valid
/// there until it expires.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(session::removal_cookie()), Redirect::to("/"))
}
