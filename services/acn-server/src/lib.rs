//! ACN API server
//!
//! REST surface over the credit ledger. Every route lives under `/v1`;
//! `GET /health` is also served at the root for load balancers.
//!
//! Agents authenticate with `Authorization: Bearer <api key>`, where the key
//! is issued by `POST /v1/agents/register`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = &state.config.api;
    let enable_cors = api.enable_cors;
    let enable_tracing = api.enable_tracing;
    let cors = cors_layer(&api.cors_origins);

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/v1", routes::api_v1_routes())
        .with_state(state);

    if enable_cors {
        app = app.layer(cors);
    }
    if enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}
