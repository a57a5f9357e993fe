//! Credit score lookups

use std::sync::Arc;

use acn_types::{ApiResponse, CreditHistoryEntry, CreditScore, HistoryQuery};
use axum::{
    extract::{Path, State},
    Json,
};

use super::ok;
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, AuthAgent};
use crate::state::AppState;

/// `GET /credit/me`
pub async fn me(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> ApiResult<Json<ApiResponse<CreditScore>>> {
    Ok(ok(state.ledger.credit_score(agent.name()).await?))
}

/// `GET /credit/:agent`; read-only, 404 for agents with no record
pub async fn score_of(
    State(state): State<Arc<AppState>>,
    Path(agent): Path<String>,
) -> ApiResult<Json<ApiResponse<CreditScore>>> {
    Ok(ok(state.ledger.find_credit_score(&agent).await?))
}

/// `GET /credit/:agent/history?limit`, newest first
pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(agent): Path<String>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Json<ApiResponse<Vec<CreditHistoryEntry>>> {
    ok(state.ledger.credit_history(&agent, query.limit).await)
}
