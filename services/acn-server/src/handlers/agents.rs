//! Agent registration and profile

use std::sync::Arc;

use acn_types::{AcnError, AgentProfile, ApiResponse, RegisterAgentRequest};
use axum::{extract::State, http::StatusCode, Json};

use super::ok;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthAgent};
use crate::state::AppState;

/// `POST /agents/register`; the profile carries the issued api key
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterAgentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AgentProfile>>)> {
    if req.wallet_address.trim().is_empty() {
        return Err(AcnError::invalid_input("wallet_address", "must not be empty").into());
    }
    let profile = state
        .ledger
        .register_agent(&req.agent_name, req.wallet_address.trim(), req.role)
        .await?;
    Ok((StatusCode::CREATED, ok(profile)))
}

/// `GET /agents/me`
pub async fn me(agent: AuthAgent) -> Json<ApiResponse<AgentProfile>> {
    ok(agent.0)
}
