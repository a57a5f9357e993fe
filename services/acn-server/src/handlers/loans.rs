//! Loan Handlers
//!
//! Request, browse, fund, repay, cancel and default loans. Ownership checks
//! (borrower-only, lender-only) happen here; the ledger enforces the state
//! machine.

use std::sync::Arc;

use acn_types::{
    AcceptBidBody, AcnError, ApiResponse, Bid, BrowseQuery, Funding, Loan, LoanDefault, LoanId,
    LoanListing, LoanRequestBody, PlaceBidBody, RepayBody, Repayment,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::{borrowed_by, ok};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiQuery, AuthAgent, OptionalApiJson};
use crate::state::AppState;

// =============================================================================
// Borrower
// =============================================================================

/// `POST /loans/request`
pub async fn request_loan(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    ApiJson(body): ApiJson<LoanRequestBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Loan>>)> {
    let loan = state
        .ledger
        .request_loan(agent.name(), body.amount, body.duration_days, &body.purpose)
        .await?;
    Ok((StatusCode::CREATED, ok(loan)))
}

/// `GET /loans/my-requests`
pub async fn my_requests(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Json<ApiResponse<Vec<Loan>>> {
    ok(state.ledger.loans_by_borrower(agent.name()).await)
}

/// `GET /loans/active`
pub async fn active(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Json<ApiResponse<Vec<Loan>>> {
    ok(state.ledger.active_loans(agent.name()).await)
}

/// `POST /loans/:id/accept-bid`
pub async fn accept_bid(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(loan_id): Path<LoanId>,
    ApiJson(body): ApiJson<AcceptBidBody>,
) -> ApiResult<Json<ApiResponse<Funding>>> {
    borrowed_by(&state, &loan_id, &agent).await?;
    let funding = state.ledger.accept_bid(&loan_id, &body.bid_id).await?;
    Ok(ok(funding))
}

/// `POST /loans/:id/repay`; an empty body pays the total due
pub async fn repay(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(loan_id): Path<LoanId>,
    OptionalApiJson(body): OptionalApiJson<RepayBody>,
) -> ApiResult<Json<ApiResponse<Repayment>>> {
    borrowed_by(&state, &loan_id, &agent).await?;
    let amount = body.and_then(|body| body.amount);
    let repayment = state.ledger.repay_loan(&loan_id, amount).await?;
    Ok(ok(repayment))
}

/// `POST /loans/:id/cancel`
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(loan_id): Path<LoanId>,
) -> ApiResult<Json<ApiResponse<Loan>>> {
    let loan = state.ledger.cancel_loan(&loan_id, agent.name()).await?;
    Ok(ok(loan))
}

// =============================================================================
// Lender
// =============================================================================

/// `GET /loans/open?min_credit&max_amount`
pub async fn open_loans(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<BrowseQuery>,
) -> Json<ApiResponse<Vec<LoanListing>>> {
    ok(state
        .ledger
        .open_loans(query.min_credit, query.max_amount)
        .await)
}

/// `GET /loans/lending`
pub async fn lending(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
) -> Json<ApiResponse<Vec<Loan>>> {
    ok(state.ledger.lending_portfolio(agent.name()).await)
}

/// `GET /loans/:id`
pub async fn get_loan(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<LoanId>,
) -> ApiResult<Json<ApiResponse<Loan>>> {
    Ok(ok(state.ledger.loan(&loan_id).await?))
}

/// `GET /loans/:id/bids`
pub async fn loan_bids(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<LoanId>,
) -> ApiResult<Json<ApiResponse<Vec<Bid>>>> {
    Ok(ok(state.ledger.bids_for_loan(&loan_id).await?))
}

/// `POST /loans/:id/bid`
pub async fn place_bid(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(loan_id): Path<LoanId>,
    ApiJson(body): ApiJson<PlaceBidBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Bid>>)> {
    let bid = state
        .ledger
        .place_bid(&loan_id, agent.name(), body.interest_rate, &body.message)
        .await?;
    Ok((StatusCode::CREATED, ok(bid)))
}

/// `POST /loans/:id/default`; only the lender, only after the term elapsed
pub async fn mark_default(
    State(state): State<Arc<AppState>>,
    agent: AuthAgent,
    Path(loan_id): Path<LoanId>,
) -> ApiResult<Json<ApiResponse<LoanDefault>>> {
    let loan = state.ledger.loan(&loan_id).await?;
    if loan.lender.as_deref() != Some(agent.name()) {
        return Err(AcnError::NotLender {
            agent: agent.name().to_string(),
            loan_id: loan_id.to_string(),
        }
        .into());
    }
    if loan.is_funded() && !loan.is_overdue(Utc::now()) {
        return Err(AcnError::LoanNotOverdue {
            loan_id: loan_id.to_string(),
        }
        .into());
    }
    let outcome = state.ledger.mark_default(&loan_id).await?;
    Ok(ok(outcome))
}
