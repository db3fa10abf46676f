mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::country::CountryNameResolver;

pub use state::DynGeocoder;

pub fn build_router(resolver: CountryNameResolver<DynGeocoder>) -> Router {
    let state = Arc::new(AppState {
        resolver: Mutex::new(resolver),
    });

    Router::new()
        .route("/api/country", get(handlers::country))
        .route(
            "/api/countries",
            get(handlers::country_list).post(handlers::resolve_batch),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(
    host: &str,
    port: u16,
    resolver: CountryNameResolver<DynGeocoder>,
) -> std::io::Result<()> {
    let app = build_router(resolver);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("geonorm server listening on http://{}", addr);
    axum::serve(listener, app).await
}
