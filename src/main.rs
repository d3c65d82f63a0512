use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twit_server::auth::token::TokenService;
use twit_server::build_router;
use twit_server::config::Config;
use twit_server::shared::AppState;
use twit_server::twit::repository::PostgresTwitRepository;
use twit_server::user::repository::PostgresUserRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twit_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting twit server");

    let config = Config::from_env();

    // Fail fast: key material and store connectivity are both required
    // before the listener opens
    let token_service = Arc::new(
        TokenService::from_pem_files(&config.private_key_path, &config.public_key_path)
            .expect("Failed to load JWT signing/verification key pair"),
    );

    let pool = sqlx::PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    info!("Connected to database");

    // Create shared application state with dependency injection
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let twit_repository = Arc::new(PostgresTwitRepository::new(pool));

    let app_state = AppState::new(user_repository, twit_repository, token_service);

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.unwrap();
}
