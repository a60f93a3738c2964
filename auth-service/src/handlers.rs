//! HTTP handlers for the issuer endpoints.
//!
//! Every authentication failure in the login and validate paths maps to
//! the same 401 response body; the specific cause is only logged. A
//! structurally invalid request body is a 400, not a 401.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use auth::{extract_bearer, Claims, Role};
use error::{AppError, AuthError, ErrorResponse};

use crate::AuthState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional role assertion; login fails when it differs from the
    /// stored role (compared case-insensitively).
    #[serde(default)]
    pub role: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub role: Role,
}

/// Identity snapshot read back from token claims.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub role: Role,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return bad_request();
    };

    match authenticate(&state, &request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(AppError::Auth(err)) => {
            // Unknown user, wrong password and role mismatch must be
            // indistinguishable to the caller.
            tracing::warn!(email = %request.email, "Login rejected: {}", err);
            unauthorized()
        }
        Err(err) => {
            tracing::error!("Login failed: {}", err);
            internal_error()
        }
    }
}

async fn authenticate(state: &AuthState, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    let user = state
        .store
        .find_by_email(&request.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password_ok = state
        .store
        .verify_password(&request.password, &user.password_hash)
        .await?;
    if !password_ok {
        return Err(AuthError::InvalidCredentials.into());
    }

    if let Some(asserted) = request.role.as_deref() {
        if !user.role.matches(asserted) {
            return Err(AuthError::RoleMismatch.into());
        }
    }

    let token = state
        .tokens
        .mint(&user.email, user.role, Utc::now().timestamp())?;

    Ok(LoginResponse {
        token,
        email: user.email,
        role: user.role,
    })
}

/// GET /auth/validate
///
/// The remote contract the gateway delegates to: 204 on a valid token,
/// 401 otherwise, empty body either way.
pub async fn validate(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    match check_bearer(&state, &headers) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            tracing::warn!("Token validation failed: {}", err);
            unauthorized()
        }
    }
}

/// GET /auth/me
///
/// Session restore: returns the identity embedded in the token claims.
/// This is a read of the mint-time snapshot, not of the user store.
pub async fn me(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    match check_bearer(&state, &headers) {
        Ok(claims) => Json(MeResponse {
            email: claims.sub,
            role: claims.role,
        })
        .into_response(),
        Err(err) => {
            tracing::warn!("Session restore rejected: {}", err);
            unauthorized()
        }
    }
}

/// POST /auth/logout
///
/// Stateless acknowledgement; the client discards its token. No
/// server-side session exists to revoke.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn check_bearer(state: &AuthState, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = extract_bearer(header)?;
    state.tokens.verify(token, Utc::now().timestamp())
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized())).into_response()
}

fn bad_request() -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request())).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("INTERNAL", "Internal error")),
    )
        .into_response()
}
