//! Health Check Handlers

use acn_types::{ApiResponse, HealthResponse};
use axum::Json;
use chrono::Utc;

use super::ok;

/// Returns 200 while the process is serving requests
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
