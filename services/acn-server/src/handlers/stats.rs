use std::sync::Arc;

use acn_types::{ApiResponse, LedgerStats};
use axum::{extract::State, Json};

use super::ok;
use crate::state::AppState;

/// `GET /stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<LedgerStats>> {
    ok(state.ledger.stats().await)
}
