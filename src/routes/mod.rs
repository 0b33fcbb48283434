//! Router assembly: API routes under `/api`, health endpoints at the root, uploaded images under `/uploads`.

mod api;
mod common;

pub use api::api_routes;
pub use common::{common_routes, common_routes_with_ready};

use crate::state::AppState;
use crate::uploads::PUBLIC_PREFIX;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Full application router. Every route is unauthenticated.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", api_routes(state))
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
