mod utils;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use twit_server::shared::AppError;
use twit_server::twit::models::TwitModel;
use twit_server::twit::repository::TwitRepository;
use twit_server::user::types::TokenResponse;

use utils::{
    authed_json_request, authed_request, body_json, json_request, test_app,
    test_app_with_twit_repository,
};

/// Signs up and logs in a user, returning a valid bearer token
async fn signup_and_login(app: &Router, username: &str, email: &str, password: &str) -> String {
    let signup_body = format!(
        r#"{{"username": "{}", "email": "{}", "password": "{}"}}"#,
        username, email, password
    );
    let response = app
        .clone()
        .oneshot(json_request("POST", "/signup", &signup_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let login_body = format!(r#"{{"email": "{}", "password": "{}"}}"#, email, password);
    let response = app
        .clone()
        .oneshot(json_request("POST", "/login", &login_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let token_response: TokenResponse = body_json(response).await;
    assert!(!token_response.token.is_empty());
    token_response.token
}

#[tokio::test]
async fn test_signup_login_and_twit_crud_workflow() {
    let (app, _) = test_app();

    let token = signup_and_login(&app, "alice", "a@x.com", "secret123").await;

    // Create a twit
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/twit",
            &token,
            r#"{"body": "first twit"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let twit: TwitModel = body_json(response).await;
    assert_eq!(twit.body, "first twit");

    // Fetch it back
    let response = app
        .clone()
        .oneshot(authed_request("GET", &format!("/twit/{}", twit.id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Update it
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/twit/{}", twit.id),
            &token,
            r#"{"body": "edited twit"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: TwitModel = body_json(response).await;
    assert_eq!(updated.body, "edited twit");

    // The public timeline shows it without any token
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let timeline: Vec<TwitModel> = body_json(response).await;
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].body, "edited twit");

    // Delete it
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/twit/{}", twit.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone now
    let response = app
        .oneshot(authed_request("GET", &format!("/twit/{}", twit.id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_with_wrong_password_yields_no_token() {
    let (app, _) = test_app();

    let signup_body = r#"{"username": "alice", "email": "a@x.com", "password": "secret123"}"#;
    app.clone()
        .oneshot(json_request("POST", "/signup", signup_body))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            r#"{"email": "a@x.com", "password": "wrong"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json: serde_json::Value = body_json(response).await;
    assert!(json.get("token").is_none());
}

#[tokio::test]
async fn test_other_user_cannot_delete_twit() {
    let (app, twit_repository) = test_app();

    let alice_token = signup_and_login(&app, "alice", "a@x.com", "secret123").await;
    let bob_token = signup_and_login(&app, "bob", "b@x.com", "hunter22").await;

    // Alice posts
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/twit",
            &alice_token,
            r#"{"body": "alice's twit"}"#,
        ))
        .await
        .unwrap();
    let twit: TwitModel = body_json(response).await;

    // Bob, validly authenticated, tries to delete it
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/twit/{}", twit.id),
            &bob_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The twit still exists
    assert_eq!(twit_repository.twit_count(), 1);

    // And Bob cannot edit it either
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/twit/{}", twit.id),
            &bob_token,
            r#"{"body": "bob was here"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored = twit_repository.get_twit(twit.id).await.unwrap().unwrap();
    assert_eq!(stored.body, "alice's twit");
}

/// Twit repository that fails the test if any method is ever called
struct UnreachableTwitRepository;

#[async_trait]
impl TwitRepository for UnreachableTwitRepository {
    async fn list_twits(&self) -> Result<Vec<TwitModel>, AppError> {
        panic!("repository reached without authentication");
    }
    async fn get_twit(&self, _twit_id: i64) -> Result<Option<TwitModel>, AppError> {
        panic!("repository reached without authentication");
    }
    async fn create_twit(&self, _user_id: i64, _body: &str) -> Result<TwitModel, AppError> {
        panic!("repository reached without authentication");
    }
    async fn update_twit(
        &self,
        _twit_id: i64,
        _owner_id: i64,
        _body: &str,
    ) -> Result<bool, AppError> {
        panic!("repository reached without authentication");
    }
    async fn delete_twit(&self, _twit_id: i64, _owner_id: i64) -> Result<bool, AppError> {
        panic!("repository reached without authentication");
    }
}

#[tokio::test]
async fn test_protected_routes_reject_before_any_store_access() {
    let app = test_app_with_twit_repository(Arc::new(UnreachableTwitRepository));

    // No Authorization header at all
    let response = app
        .clone()
        .oneshot(json_request("POST", "/twit", r#"{"body": "hi"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/twit/1", "not.a.token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/twit/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request("PUT", "/twit/1", r#"{"body": "hi"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_foreign_key_pair_is_rejected() {
    let (app, _) = test_app();

    // Signed with a different private key than the configured public key
    let other_signing_key = include_str!("fixtures/other_signing_key.pem");
    let other_verify_key = include_str!("fixtures/other_verify_key.pem");
    let foreign = twit_server::auth::token::TokenService::from_pem(
        other_signing_key.as_bytes(),
        other_verify_key.as_bytes(),
    )
    .unwrap();
    let forged = foreign.issue(1).unwrap();

    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/twit",
            &forged,
            r#"{"body": "forged"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_timeline_requires_no_token() {
    let (app, twit_repository) = test_app();

    let token = signup_and_login(&app, "alice", "a@x.com", "secret123").await;
    app.clone()
        .oneshot(authed_json_request(
            "POST",
            "/twit",
            &token,
            r#"{"body": "visible to all"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(twit_repository.twit_count(), 1);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let timeline: Vec<TwitModel> = body_json(response).await;
    assert_eq!(timeline.len(), 1);
}
