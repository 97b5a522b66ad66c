use application::FantasyApp;
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use config::GameRules;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod auth;
mod response;
mod routes;
mod settings;
mod validate;

use settings::Config;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<FantasyApp>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,tower_http=debug")
        .init();

    info!("Starting Fantasy League API Server");

    // Load configuration from environment
    let config = Config::from_env();

    info!("Using database: {}", config.database_path);
    info!("API server will bind to: {}:{}", config.api_host, config.api_port);

    let app = Arc::new(FantasyApp::new_with_config(
        &config.database_path,
        GameRules::from_env(),
        config.access_ttl_secs,
        config.refresh_ttl_secs,
    ));
    let app_state = AppState { app };

    // Build our application with routes
    let app = Router::new()
        // Identity and session endpoints
        .route("/iam/signup", post(routes::iam::sign_up))
        .route("/iam/signin", post(routes::iam::sign_in))
        .route(
            "/iam/update-session",
            post(routes::iam::update_session),
        )
        // Player management
        .route(
            "/player",
            get(routes::player::list)
                .post(routes::player::create)
                .put(routes::player::update)
                .delete(routes::player::delete),
        )
        // Team management
        .route(
            "/team",
            get(routes::team::list)
                .post(routes::team::create)
                .put(routes::team::update)
                .delete(routes::team::delete),
        )
        // Transfer market
        .route(
            "/transfer",
            get(routes::transfer::search)
                .post(routes::transfer::list_player)
                .delete(routes::transfer::delist),
        )
        .route(
            "/transfer/execute",
            post(routes::transfer::execute),
        )
        // User administration
        .route(
            "/user",
            get(routes::user::list)
                .post(routes::user::create)
                .put(routes::user::update)
                .delete(routes::user::delete),
        )
        // Health check
        .route("/", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Run the server
    let bind_address = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Fantasy League API",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
