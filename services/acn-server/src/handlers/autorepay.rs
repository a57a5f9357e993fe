//! Earnings-to-repayment hooks

use std::sync::Arc;

use acn_types::{
    ApiResponse, AutoRepayConfig, AutoRepayExecution, AutoRepayRule, ConnectAutoRepayBody,
    EarningsBody, EarningsRouting, EarningsSource, ExecuteAutoRepayBody, LoanId,
};
use axum::{
    extract::{Path, State},
    Json,
};

use super::{borrowed_by, ok};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthAgent};
use crate::state::AppState;

/// `POST /auto-repay/connect`
pub async fn connect(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    ApiJson(body): ApiJson<ConnectAutoRepayBody>,
) -> ApiResult<Json<ApiResponse<AutoRepayConfig>>> {
    let config = state
        .ledger
        .connect_auto_repay(agent.name(), body.source, body.percentage)
        .await?;
    Ok(ok(config))
}

/// `GET /auto-repay/status`
pub async fn status(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Json<ApiResponse<Vec<AutoRepayConfig>>> {
    ok(state.ledger.auto_repay_status(agent.name()).await)
}

/// `DELETE /auto-repay/:source`
pub async fn disable(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(source): Path<String>,
) -> ApiResult<Json<ApiResponse<AutoRepayConfig>>> {
    let source: EarningsSource = source.parse()?;
    let config = state.ledger.disable_auto_repay(agent.name(), source).await?;
    Ok(ok(config))
}

/// `POST /auto-repay/earnings`; routes the hook's share into repayments
pub async fn earnings(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    ApiJson(body): ApiJson<EarningsBody>,
) -> ApiResult<Json<ApiResponse<EarningsRouting>>> {
    let routing = state
        .ledger
        .apply_earnings(agent.name(), body.source, body.amount)
        .await?;
    Ok(ok(routing))
}

/// `POST /auto-repay/loans/:id/execute`; checks a balance rule for one loan
pub async fn execute(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(loan_id): Path<LoanId>,
    ApiJson(body): ApiJson<ExecuteAutoRepayBody>,
) -> ApiResult<Json<ApiResponse<AutoRepayExecution>>> {
    borrowed_by(&state, &loan_id, &agent).await?;
    let rule = AutoRepayRule {
        loan_id,
        threshold: body.threshold,
        min_balance: body.min_balance,
    };
    let outcome = state.ledger.execute_auto_repay(&rule, body.balance).await?;
    Ok(ok(outcome))
}
