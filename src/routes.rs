//! # Router
//!
//! Every request passes through the session guard first. The guard only acts
//! on paths under `/dashboard`, so public routes and static assets are
//! untouched.

use crate::handlers::auth::{login, logout};
use crate::handlers::health::health_check;
use crate::handlers::pages::{dashboard, login_page};
use crate::middleware::auth::require_session;
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(login_page))
        .route("/login", post(login))
        .route("/dashboard", get(dashboard))
        .route("/logout", post(logout))
        .route("/health", get(health_check))
        // Stylesheet and other assets
        .fallback_service(ServeDir::new(static_dir))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::testing::{StaticBackend, EMAIL, PASSWORD};
    use crate::session::COOKIE_NAME;
    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
    };
    use axum_extra::extract::cookie::{Cookie, SameSite};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(backend: StaticBackend) -> Router {
        router(AppState::with_backend(Arc::new(backend)), "static")
    }

    fn app() -> Router {
        app_with(StaticBackend::new())
    }

    fn login_request(email: &str, password: &str) -> Request<Body> {
        let form = format!(
            "email={}&password={}",
            email.replace('@', "%40"),
            password.replace(' ', "+")
        );
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("request builds successfully")
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).expect("request builds successfully")
    }

    fn location(res: &Response<Body>) -> &str {
        res.headers()
            .get(header::LOCATION)
            .expect("redirect has location")
            .to_str()
            .unwrap()
    }

    fn session_cookie(res: &Response<Body>) -> Cookie<'static> {
        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .expect("response includes set-cookie header")
            .to_str()
            .expect("set-cookie header is valid utf-8");
        Cookie::parse_encoded(set_cookie.to_owned())
            .expect("set-cookie parses successfully")
    }

    fn cookie_header(cookie: &Cookie<'_>) -> String {
        cookie.encoded().stripped().to_string()
    }

    async fn body_text(res: Response<Body>) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn login_page_is_public() {
        let res = app().oneshot(get("/", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("name=\"email\""));
        assert!(body.contains("action=\"/login\""));
    }

    #[tokio::test]
    async fn health_is_public() {
        let res = app().oneshot(get("/health", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("healthy"));
    }

    #[tokio::test]
    async fn stylesheet_is_served() {
        let res = app().oneshot(get("/styles.css", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_sets_cookie_and_dashboard_shows_record() {
        let app = app();

        let res = app.clone().oneshot(login_request(EMAIL, PASSWORD)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/dashboard");

        let cookie = session_cookie(&res);
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));

        let res = app
            .oneshot(get("/dashboard", Some(&cookie_header(&cookie))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains(EMAIL));
        assert!(body.contains("u1"));
        assert!(body.contains("Alice &#60;admin&#62;"));
        assert!(!body.contains("<admin>"));
        assert!(body.contains("action=\"/logout\""));
    }

    #[tokio::test]
    async fn logout_clears_cookie_and_dashboard_redirects() {
        let app = app();

        let res = app.clone().oneshot(login_request(EMAIL, PASSWORD)).await.unwrap();
        let cookie = session_cookie(&res);

        let req = Request::builder()
            .method("POST")
            .uri("/logout")
            .header(header::COOKIE, cookie_header(&cookie))
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");

        let removal = session_cookie(&res);
        assert_eq!(removal.name(), COOKIE_NAME);
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age().map(|age| age.whole_seconds()), Some(0));

        let res = app.oneshot(get("/dashboard", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");
    }

    #[tokio::test]
    async fn logout_without_cookie_still_redirects() {
        let req = Request::builder()
            .method("POST")
            .uri("/logout")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");
    }

    #[tokio::test]
    async fn invalid_credentials_render_error_without_cookie() {
        let res = app().oneshot(login_request(EMAIL, "wrong")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(header::SET_COOKIE).is_none());

        let body = body_text(res).await;
        assert!(body.contains("Invalid e-mail or password"));
        assert!(!body.contains("wrong"));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_backend() {
        let res = app_with(StaticBackend::unreachable())
            .oneshot(login_request("", ""))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(res).await.contains("required"));
    }

    #[tokio::test]
    async fn backend_outage_renders_error_without_cookie() {
        let res = app_with(StaticBackend::unreachable())
            .oneshot(login_request(EMAIL, PASSWORD))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(res).await.contains("unavailable"));
    }

    #[tokio::test]
    async fn dashboard_rejects_missing_and_broken_cookies() {
        let app = app();

        let res = app.clone().oneshot(get("/dashboard", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");

        let res = app
            .clone()
            .oneshot(get("/dashboard", Some("pb_auth=%7Bbroken")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let res = app
            .oneshot(get("/dashboard/anything", Some("other=1")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn dashboard_rejects_expired_session() {
        use crate::identity::token;
        use crate::session::Session;
        use serde_json::{json, Map};

        let expired = token::forge(&json!({"id": "u1", "exp": 1_000}));
        let cookie = Session::new(expired, Map::new()).to_cookie().unwrap();

        let res = app()
            .oneshot(get("/dashboard", Some(&cookie_header(&cookie))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");
    }
}
