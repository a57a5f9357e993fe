//! Public rankings of lenders, borrowers and volume

use std::sync::Arc;

use acn_types::{
    ApiResponse, BorrowerStanding, LeaderboardQuery, LenderStanding, VolumeStanding,
    DEFAULT_LEADERBOARD_LIMIT,
};
use axum::{extract::State, Json};

use super::ok;
use crate::extractors::ApiQuery;
use crate::state::AppState;

const MAX_LEADERBOARD_LIMIT: usize = 100;

fn limit(query: &LeaderboardQuery) -> usize {
    query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT)
}

/// `GET /leaderboard/lenders?limit`
pub async fn lenders(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<LeaderboardQuery>,
) -> Json<ApiResponse<Vec<LenderStanding>>> {
    ok(state.ledger.lender_leaderboard(limit(&query)).await)
}

/// `GET /leaderboard/borrowers?limit`
pub async fn borrowers(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<LeaderboardQuery>,
) -> Json<ApiResponse<Vec<BorrowerStanding>>> {
    ok(state.ledger.borrower_leaderboard(limit(&query)).await)
}

/// `GET /leaderboard/volume?limit`
pub async fn volume(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<LeaderboardQuery>,
) -> Json<ApiResponse<Vec<VolumeStanding>>> {
    ok(state.ledger.volume_leaderboard(limit(&query)).await)
}
