//! Issuer endpoint tests driven through the router in-process.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use auth::{Role, TokenConfig};
use auth_service::{AuthState, MemoryUserStore, UserRecord};

const SECRET: &str = "itest-secret";

fn test_state() -> AuthState {
    // Low bcrypt cost keeps the suite fast.
    let password_hash = bcrypt::hash("secret", 4).unwrap();
    let store = MemoryUserStore::new().with_user(UserRecord {
        email: "a@x.com".to_string(),
        password_hash,
        role: Role::User,
    });
    AuthState::new(Arc::new(store), TokenConfig::new(SECRET, 3600))
}

fn app() -> Router {
    auth_service::router(test_state())
}

async fn post_login(body: &str) -> Response {
    app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_with_bearer(uri: &str, token: &str) -> Response {
    app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login_token() -> String {
    let response = post_login(r#"{"email":"a@x.com","password":"secret"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_returns_token_and_profile() {
    let response = post_login(r#"{"email":"a@x.com","password":"secret","role":"USER"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "USER");
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn role_assertion_is_case_insensitive() {
    let response = post_login(r#"{"email":"a@x.com","password":"secret","role":"user"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let wrong_password = post_login(r#"{"email":"a@x.com","password":"nope"}"#).await;
    let unknown_user = post_login(r#"{"email":"ghost@x.com","password":"secret"}"#).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let first = to_bytes(wrong_password.into_body(), usize::MAX).await.unwrap();
    let second = to_bytes(unknown_user.into_body(), usize::MAX).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn role_mismatch_gets_the_same_generic_rejection() {
    let mismatch = post_login(r#"{"email":"a@x.com","password":"secret","role":"ADMIN"}"#).await;
    let wrong_password = post_login(r#"{"email":"a@x.com","password":"nope"}"#).await;

    assert_eq!(mismatch.status(), StatusCode::UNAUTHORIZED);

    let first = to_bytes(mismatch.into_body(), usize::MAX).await.unwrap();
    let second = to_bytes(wrong_password.into_body(), usize::MAX).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_fields_are_a_bad_request() {
    let response = post_login(r#"{"email":"a@x.com"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn validate_accepts_a_minted_token() {
    let token = login_token().await;
    let response = get_with_bearer("/auth/validate", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn validate_rejects_a_tampered_token() {
    let token = login_token().await;
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = get_with_bearer("/auth/validate", &tampered).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validate_without_header_is_unauthorized() {
    let response = app()
        .oneshot(Request::builder().uri("/auth/validate").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validate_rejects_an_expired_token() {
    // Minted in the past with a one-second lifetime, checked now.
    let stale = TokenConfig::new(SECRET, 1)
        .mint("a@x.com", Role::User, chrono::Utc::now().timestamp() - 2)
        .unwrap();

    let response = get_with_bearer("/auth/validate", &stale).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_the_claims_snapshot() {
    let token = login_token().await;
    let response = get_with_bearer("/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "USER");
}

#[tokio::test]
async fn logout_is_a_stateless_acknowledgement() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
