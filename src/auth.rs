//! Username session handling.
//!
//! The app identifies users by a remembered display name rather than real
//! credentials, so "login" just stores the trimmed username in a long-lived
//! cookie. The middleware reads it back and hands it to handlers as
//! [`CurrentUser`]; core operations always receive the username as an
//! explicit parameter, never through ambient state.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use axum::Extension;
use serde::Deserialize;
use serde_json::json;
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::error::{AppError, AppResult};

/// Cookie name for the remembered username.
pub const SESSION_COOKIE: &str = "spendwise_user";

/// Usernames double as the storage namespace and the cookie value, so keep
/// them to characters that survive both.
const MAX_USERNAME_LEN: usize = 40;

#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

fn valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Middleware gating the JSON API behind a session cookie. Static assets,
/// the login endpoint and the health check stay open.
pub async fn session_middleware(
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        let username = cookie.value().trim().to_string();
        if valid_username(&username) {
            request.extensions_mut().insert(CurrentUser(username));
            return next.run(request).await;
        }
    }

    if request.uri().path().starts_with("/api/") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Login required" })),
        )
            .into_response();
    }

    next.run(request).await
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

pub async fn login(
    cookies: Cookies,
    Json(form): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let username = form.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if !valid_username(&username) {
        return Err(AppError::Validation(
            "Username may only contain letters, digits, '.', '-' and '_'".into(),
        ));
    }

    let cookie = Cookie::build((SESSION_COOKIE, username.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(365))
        .build();
    cookies.add(cookie);

    tracing::info!(username = %username, "User logged in");
    Ok(Json(json!({ "username": username })))
}

pub async fn logout(cookies: Cookies) -> Json<serde_json::Value> {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .build();
    cookies.remove(cookie);

    Json(json!({ "ok": true }))
}

/// Report the active session so the SPA can restore its state on load.
pub async fn session(Extension(user): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(json!({ "username": user.0 }))
}
