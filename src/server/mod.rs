pub mod handlers;
pub mod models;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Build the API router. Paths live under /api so a frontend dev proxy can
/// forward them without CORS fuss; the permissive layer covers direct calls.
pub fn create_router() -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/predict", post(handlers::predict))
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server.
pub async fn start_server(port: u16) -> anyhow::Result<()> {
    let app = create_router();
    let addr = format!("0.0.0.0:{port}");
    tracing::info!("prediction API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
