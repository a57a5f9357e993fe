//! Network analytics

use std::sync::Arc;

use acn_types::{
    AcnError, AnalyticsOverview, ApiResponse, DailyVolume, TierBucket, VolumeQuery,
    DEFAULT_VOLUME_DAYS,
};
use axum::{extract::State, Json};

use super::ok;
use crate::error::ApiResult;
use crate::extractors::ApiQuery;
use crate::state::AppState;

const MAX_VOLUME_DAYS: u32 = 365;

/// `GET /analytics/overview`
pub async fn overview(State(state): State<Arc<AppState>>) -> Json<ApiResponse<AnalyticsOverview>> {
    ok(state.ledger.analytics_overview().await)
}

/// `GET /analytics/volume?days`, newest day first
pub async fn volume(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<VolumeQuery>,
) -> ApiResult<Json<ApiResponse<Vec<DailyVolume>>>> {
    let days = query.days.unwrap_or(DEFAULT_VOLUME_DAYS);
    if !(1..=MAX_VOLUME_DAYS).contains(&days) {
        return Err(AcnError::invalid_input(
            "days",
            format!("must be between 1 and {}", MAX_VOLUME_DAYS),
        )
        .into());
    }
    Ok(ok(state.ledger.daily_volume(days).await))
}

/// `GET /analytics/tiers`
pub async fn tiers(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<TierBucket>>> {
    ok(state.ledger.tier_distribution().await)
}
