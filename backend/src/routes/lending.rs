use axum::extract::{Path, Query, State};
use axum::Json;

use crate::chain::ChainReader;
use crate::error::ApiError;
use crate::lending::{estimate, LockPeriod, YieldEstimate, DEFAULT_BASE_APY_PERCENT};
use crate::models::{EstimateQuery, LenderOverview, PoolStats};
use crate::reads;

use super::{require_address, AppState};

pub async fn get_lender<R: ChainReader>(
    State(state): State<AppState<R>>,
    Path(owner): Path<String>,
) -> Result<Json<LenderOverview>, ApiError> {
    require_address(&owner)?;
    Ok(Json(
        reads::lender_overview(&*state.chain, &state.config, &owner).await,
    ))
}

pub async fn get_pool<R: ChainReader>(State(state): State<AppState<R>>) -> Json<PoolStats> {
    Json(reads::pool_stats(&*state.chain, &state.config).await)
}

pub async fn get_estimate(
    Query(query): Query<EstimateQuery>,
) -> Result<Json<YieldEstimate>, ApiError> {
    let period = LockPeriod::for_months(query.months).ok_or_else(|| {
        ApiError::BadRequest(format!("unsupported lock period: {} months", query.months))
    })?;
    let base_apy = query.base_apy.unwrap_or(DEFAULT_BASE_APY_PERCENT);
    Ok(Json(estimate(query.amount, base_apy, period)))
}
