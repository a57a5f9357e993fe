use std::sync::Arc;

use acn_types::{ApiResponse, Bid};
use axum::{extract::State, Json};

use super::ok;
use crate::extractors::AuthAgent;
use crate::state::AppState;

/// `GET /bids/my-bids`
pub async fn my_bids(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Json<ApiResponse<Vec<Bid>>> {
    ok(state.ledger.bids_by_lender(agent.name()).await)
}
