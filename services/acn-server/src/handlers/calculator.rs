use acn_types::{AcnError, ApiResponse, ReturnsQuery, ReturnsQuote};
use axum::Json;

use super::ok;
use crate::error::ApiResult;
use crate::extractors::ApiQuery;

/// `GET /calculator/returns?amount&rate&duration`
pub async fn returns(
    ApiQuery(query): ApiQuery<ReturnsQuery>,
) -> ApiResult<Json<ApiResponse<ReturnsQuote>>> {
    if !query.amount.is_finite() || query.amount <= 0.0 {
        return Err(AcnError::invalid_input("amount", "must be a positive number").into());
    }
    if !query.rate.is_finite() || query.rate < 0.0 {
        return Err(AcnError::invalid_input("rate", "must not be negative").into());
    }
    if query.duration == 0 {
        return Err(AcnError::invalid_input("duration", "must be at least 1").into());
    }
    Ok(ok(ReturnsQuote::calculate(
        query.amount,
        query.rate,
        query.duration,
    )))
}
