//! API Handlers
//!
//! One module per resource. Every handler answers with the
//! `{success, data}` envelope.

pub mod health;
pub mod agents;
pub mod loans;
pub mod bids;
pub mod credit;
pub mod calculator;
pub mod autorepay;
pub mod stats;
pub mod leaderboard;
pub mod analytics;

use acn_types::{AcnError, ApiResponse, Loan, LoanId};
use axum::Json;

use crate::error::ApiResult;
use crate::extractors::AuthAgent;
use crate::state::AppState;

/// Wrap a payload in the success envelope
pub(crate) fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Loan that the caller must have borrowed
pub(crate) async fn borrowed_by(
    state: &AppState,
    loan_id: &LoanId,
    agent: &AuthAgent,
) -> ApiResult<Loan> {
    let loan = state.ledger.loan(loan_id).await?;
    if loan.borrower != agent.name() {
        return Err(AcnError::NotBorrower {
            agent: agent.name().to_string(),
            loan_id: loan_id.to_string(),
        }
        .into());
    }
    Ok(loan)
}
