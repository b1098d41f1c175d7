pub mod handlers;
pub mod types;

use crate::{Result, config::Config, pipeline::Arena};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds the HTTP routes over an existing state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/models", get(handlers::list_models))
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/:id", get(handlers::get_session))
        .route("/api/generate", post(handlers::generate))
        .route("/api/descriptions", post(handlers::describe_product))
        .route("/api/recommendations", post(handlers::recommend))
        .route("/api/format", post(handlers::format))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config) -> Result<()> {
    let arena = Arena::new(&config);
    let app_state = AppState::new(arena, config.arena.clone());

    let mut app = app(app_state);
    if config.server.cors_allow_any_origin {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
