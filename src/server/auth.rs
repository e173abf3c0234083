//! Login/logout endpoints and the owner session guard

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::auth::{clear_cookie, session_cookie, COOKIE_NAME};
use crate::error::Error;
use crate::helpers::encode_query;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    secret: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = payload.map_err(|e| Error::InvalidRequest(e.body_text()))?;

    let expected = state.config.owner_secret.as_deref().unwrap_or_default();
    if expected.is_empty() || !state.signer.secrets_match(&request.secret, expected) {
        tracing::warn!("Rejected login attempt");
        return Err(Error::Unauthorized);
    }

    let token = state.signer.issue(state.clock.now());
    tracing::info!("Owner logged in");
    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&token, state.config.cookie_secure),
        )],
        "OK",
    )
        .into_response())
}

/// POST /api/auth/logout
///
/// Only clears the cookie; issued tokens stay valid until they expire.
pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::SET_COOKIE, clear_cookie(state.config.cookie_secure))],
        "OK",
    )
        .into_response()
}

/// Middleware guarding owner-only routes
///
/// API requests without a valid session get 401; page requests are sent to
/// the login page, with a `next` parameter when no cookie was presented.
pub async fn require_owner(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let Some(cookie) = jar.get(COOKIE_NAME) else {
        tracing::debug!("No session cookie for {}", path);
        return if is_api(&path) {
            Error::Unauthorized.into_response()
        } else {
            Redirect::temporary(&format!("/login?next={}", encode_query(&path))).into_response()
        };
    };

    match state.signer.verify(cookie.value(), state.clock.now()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!("Rejected session for {}: {}", path, e);
            if is_api(&path) {
                Error::Unauthorized.into_response()
            } else {
                Redirect::temporary("/login").into_response()
            }
        }
    }
}

fn is_api(path: &str) -> bool {
    path.starts_with("/api/")
}
