//! Admin panel login.
//!
//! A successful login sets an `auth=true` HttpOnly cookie; logout clears it.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use espetinho_core::validation::validate_required;
use espetinho_core::ValidationError;
use tracing::{info, warn};

use crate::dto::LoginRequest;
use crate::error::{ok_message, AppResult, ApiError};
use crate::state::AppState;

const AUTH_COOKIE: &str = "auth=true; HttpOnly; Path=/; SameSite=Lax";
const CLEAR_COOKIE: &str = "auth=; HttpOnly; Path=/; Max-Age=0";

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    ValidationError::first_of(
        [
            validate_required("username", &payload.username),
            validate_required("password", &payload.password),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect(),
    )?;

    if !state.verifier.verify(&payload.username, &payload.password) {
        warn!(username = %payload.username, "Rejected admin login");
        return Err(ApiError::unauthorized());
    }

    info!(username = %payload.username, "Admin logged in");
    Ok(([(SET_COOKIE, AUTH_COOKIE)], ok_message("Logged in")))
}

/// GET /api/auth/logout
pub async fn logout() -> impl IntoResponse {
    info!("Admin logged out");
    ([(SET_COOKIE, CLEAR_COOKIE)], ok_message("Logged out"))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, test_app};
    use axum::http::{header::SET_COOKIE, Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let (app, _db) = test_app().await;

        let (status, headers, json) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "usuario": "admin", "senha": "1234" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("auth=true"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let (app, _db) = test_app().await;

        let (status, headers, json) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": "wrong" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert!(headers.get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (app, _db) = test_app().await;

        let (status, _, json) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "usuario": "admin" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "password is required");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (app, _db) = test_app().await;

        let (status, headers, _) = send(&app, Method::GET, "/api/auth/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }
}
