use axum::extract::{Path, State};
use axum::Json;

use crate::chain::{ChainError, ChainReader};
use crate::error::ApiError;
use crate::models::{AccountOverview, CreditLineInfo, PreAuthStatus};
use crate::reads;

use super::{now_ts, require_address, AppState};

pub async fn get_account<R: ChainReader>(
    State(state): State<AppState<R>>,
    Path(owner): Path<String>,
) -> Result<Json<AccountOverview>, ApiError> {
    require_address(&owner)?;
    let overview = reads::account_overview(&*state.chain, &state.config, &owner, now_ts()).await;
    Ok(Json(overview))
}

/// A failing node is an upstream error; an abort or other 4xx answer means the
/// account has no such record.
fn missing_or_upstream(err: ChainError, what: &str) -> ApiError {
    if err.is_upstream() {
        ApiError::Upstream(err)
    } else {
        ApiError::NotFound(format!("no {what} for this account"))
    }
}

pub async fn get_credit<R: ChainReader>(
    State(state): State<AppState<R>>,
    Path(owner): Path<String>,
) -> Result<Json<CreditLineInfo>, ApiError> {
    require_address(&owner)?;
    reads::credit_info(&*state.chain, &state.config, &owner)
        .await
        .map(Json)
        .map_err(|err| missing_or_upstream(err, "credit line"))
}

pub async fn get_preauth<R: ChainReader>(
    State(state): State<AppState<R>>,
    Path(owner): Path<String>,
) -> Result<Json<PreAuthStatus>, ApiError> {
    require_address(&owner)?;
    reads::preauth_status(&*state.chain, &state.config, &owner)
        .await
        .map(Json)
        .map_err(|err| missing_or_upstream(err, "pre-authorization"))
}
