// Library crate for the twit server
// This file exposes the public API for integration tests

pub mod auth;
pub mod config;
pub mod shared;
pub mod twit;
pub mod user;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use auth::{token::TokenService, AuthUser, Claims};
pub use shared::{AppError, AppState};
pub use twit::models::TwitModel;
pub use user::models::UserModel;

/// Builds the full application router.
///
/// Shared between main and the integration tests so both exercise the same
/// routing table and middleware stack. Reading the timeline, signup, login,
/// and logout are public; every twit mutation and single-twit read sits
/// behind the JWT middleware.
pub fn build_router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/twit", post(twit::create_twit))
        .route(
            "/twit/:id",
            get(twit::get_twit)
                .put(twit::update_twit)
                .delete(twit::delete_twit),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::jwt_auth,
        ));

    Router::new()
        .route("/", get(twit::list_twits))
        .route("/signup", post(user::signup))
        .route("/login", post(user::login))
        .route("/logout", get(user::logout))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
