use axum::body::Body;
use axum::http::Request;
use axum::Router;
use std::sync::Arc;

use twit_server::auth::token::TokenService;
use twit_server::build_router;
use twit_server::shared::AppState;
use twit_server::twit::repository::{InMemoryTwitRepository, TwitRepository};
use twit_server::user::repository::InMemoryUserRepository;

pub const TEST_SIGNING_KEY: &str = include_str!("../fixtures/test_signing_key.pem");
pub const TEST_VERIFY_KEY: &str = include_str!("../fixtures/test_verify_key.pem");

/// Token service backed by the checked-in RSA test fixtures
pub fn test_token_service() -> TokenService {
    TokenService::from_pem(TEST_SIGNING_KEY.as_bytes(), TEST_VERIFY_KEY.as_bytes()).unwrap()
}

/// Full application with in-memory repositories; returns the twit
/// repository handle so tests can assert on stored state directly
pub fn test_app() -> (Router, Arc<InMemoryTwitRepository>) {
    let twit_repository = Arc::new(InMemoryTwitRepository::new());
    let app_state = AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        twit_repository.clone(),
        Arc::new(test_token_service()),
    );
    (build_router(app_state), twit_repository)
}

/// Full application with a caller-supplied twit repository
pub fn test_app_with_twit_repository(
    twit_repository: Arc<dyn TwitRepository + Send + Sync>,
) -> Router {
    let app_state = AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        twit_repository,
        Arc::new(test_token_service()),
    );
    build_router(app_state)
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_json_request(method: &str, uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
