//! Typed contract reads and the aggregates built from them.
//!
//! Single reads return `Result` so callers can decide what a failure means. The
//! aggregates issue their reads concurrently and degrade per field: a failed read is
//! logged and replaced by a default (zero, `None`, `false`) instead of failing the
//! whole view. Nothing is cached; every call goes to the node.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::chain::{decode_bool, decode_i64, decode_u64, ChainError, ChainReader, ViewRequest};
use crate::config::Config;
use crate::interest::accrued_interest;
use crate::models::{
    AccountOverview, CreditLineInfo, LenderOverview, LenderPosition, PoolStats, PreAuthStatus,
};
use crate::units::units_to_usdc;

pub const USDC_BALANCE_FUNCTION: &str = "0x1::primary_fungible_store::balance";
pub const OBJECT_CORE_TYPE: &str = "0x1::object::ObjectCore";

pub const CREDIT_MODULE: &str = "credit_manager";
pub const LENDING_MODULE: &str = "lending_pool";
pub const REPUTATION_MODULE: &str = "reputation";

async fn view_contract<R: ChainReader>(
    chain: &R,
    config: &Config,
    module: &str,
    function: &str,
    extra_args: Vec<Value>,
) -> Result<Vec<Value>, ChainError> {
    let mut arguments = vec![json!(config.contract_address)];
    arguments.extend(extra_args);
    chain
        .view(ViewRequest::new(config.function(module, function), arguments))
        .await
}

/// USDC balance of `owner` in units.
///
/// Tries the fungible-asset store first, then the legacy `CoinStore` resource.
pub async fn usdc_balance<R: ChainReader>(
    chain: &R,
    config: &Config,
    owner: &str,
) -> Result<u64, ChainError> {
    let request = ViewRequest::new(
        USDC_BALANCE_FUNCTION,
        vec![json!(owner), json!(config.usdc_metadata)],
    )
    .with_type_arguments(vec![OBJECT_CORE_TYPE.to_string()]);

    let err = match chain.view(request).await.and_then(|v| decode_u64(&v, 0)) {
        Ok(balance) => return Ok(balance),
        Err(err) => err,
    };
    debug!(%owner, error = %err, "fungible store balance unavailable, trying coin store");

    let resource_type = format!("0x1::coin::CoinStore<{}>", config.usdc_metadata);
    match chain.account_resource(owner, &resource_type).await? {
        Some(resource) => coin_store_value(&resource),
        None => Err(ChainError::NotFound(resource_type)),
    }
}

fn coin_store_value(resource: &Value) -> Result<u64, ChainError> {
    let data = &resource["data"];
    let raw = data["coin"]["value"]
        .as_str()
        .or_else(|| data["balance"].as_str())
        .ok_or_else(|| ChainError::Decode("coin store has no value".to_string()))?;
    raw.parse()
        .map_err(|_| ChainError::Decode(format!("coin store value is not a u64: {raw:?}")))
}

pub async fn credit_info<R: ChainReader>(
    chain: &R,
    config: &Config,
    borrower: &str,
) -> Result<CreditLineInfo, ChainError> {
    let v = view_contract(chain, config, CREDIT_MODULE, "get_credit_info", vec![json!(borrower)])
        .await?;
    Ok(CreditLineInfo::new(
        decode_u64(&v, 0)?,
        decode_u64(&v, 1)?,
        decode_bool(&v, 2)?,
        decode_i64(&v, 3)?,
        decode_u64(&v, 4)?,
    ))
}

pub async fn preauth_status<R: ChainReader>(
    chain: &R,
    config: &Config,
    borrower: &str,
) -> Result<PreAuthStatus, ChainError> {
    let v = view_contract(
        chain,
        config,
        CREDIT_MODULE,
        "get_preauth_status",
        vec![json!(borrower)],
    )
    .await?;
    Ok(PreAuthStatus {
        total_limit: decode_u64(&v, 0)?,
        used_amount: decode_u64(&v, 1)?,
        expires_at: decode_i64(&v, 2)?,
        per_tx_limit: decode_u64(&v, 3)?,
        is_active: decode_bool(&v, 4)?,
    })
}

pub async fn has_reputation<R: ChainReader>(
    chain: &R,
    config: &Config,
    user: &str,
) -> Result<bool, ChainError> {
    let v = view_contract(chain, config, REPUTATION_MODULE, "is_initialized", vec![json!(user)])
        .await?;
    decode_bool(&v, 0)
}

pub async fn lender_exists<R: ChainReader>(
    chain: &R,
    config: &Config,
    lender: &str,
) -> Result<bool, ChainError> {
    let v = view_contract(chain, config, LENDING_MODULE, "lender_exists", vec![json!(lender)])
        .await?;
    decode_bool(&v, 0)
}

pub async fn lender_position<R: ChainReader>(
    chain: &R,
    config: &Config,
    lender: &str,
) -> Result<LenderPosition, ChainError> {
    let v = view_contract(chain, config, LENDING_MODULE, "get_lender_info", vec![json!(lender)])
        .await?;
    Ok(LenderPosition {
        deposited_amount: decode_u64(&v, 0)?,
        earned_interest: decode_u64(&v, 1)?,
        deposit_timestamp: decode_i64(&v, 2)?,
        last_update_timestamp: decode_i64(&v, 3)?,
        apy_bps: decode_u64(&v, 4)?,
    })
}

async fn pool_u64<R: ChainReader>(
    chain: &R,
    config: &Config,
    function: &str,
) -> Result<u64, ChainError> {
    let v = view_contract(chain, config, LENDING_MODULE, function, Vec::new()).await?;
    decode_u64(&v, 0)
}

pub async fn available_liquidity<R: ChainReader>(
    chain: &R,
    config: &Config,
) -> Result<u64, ChainError> {
    pool_u64(chain, config, "get_available_liquidity").await
}

/// Pool utilisation in basis points.
pub async fn utilization_bps<R: ChainReader>(
    chain: &R,
    config: &Config,
) -> Result<u64, ChainError> {
    pool_u64(chain, config, "get_utilization_rate").await
}

pub async fn total_deposited<R: ChainReader>(
    chain: &R,
    config: &Config,
) -> Result<u64, ChainError> {
    pool_u64(chain, config, "get_total_deposited").await
}

pub async fn total_borrowed<R: ChainReader>(
    chain: &R,
    config: &Config,
) -> Result<u64, ChainError> {
    pool_u64(chain, config, "get_total_borrowed").await
}

fn degrade<T>(field: &'static str, subject: &str, result: Result<T, ChainError>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(field, subject, error = %err, "read failed, using default");
            default
        }
    }
}

pub async fn account_overview<R: ChainReader>(
    chain: &R,
    config: &Config,
    owner: &str,
    now: i64,
) -> AccountOverview {
    let (balance, credit, preauth, reputation) = tokio::join!(
        usdc_balance(chain, config, owner),
        credit_info(chain, config, owner),
        preauth_status(chain, config, owner),
        has_reputation(chain, config, owner),
    );

    let credit = degrade("credit", owner, credit.map(Some), None);
    let estimated_interest = credit
        .as_ref()
        .filter(|c| c.current_debt > 0)
        .map(|c| {
            accrued_interest(
                units_to_usdc(c.current_debt),
                config.interest_rate_bps,
                c.last_borrow_timestamp,
                config.grace_period_secs,
                now,
            )
        })
        .unwrap_or(0.0);

    let overview = AccountOverview {
        owner: owner.to_string(),
        usdc_balance: degrade("usdc_balance", owner, balance, 0),
        credit,
        preauth: degrade("preauth", owner, preauth.map(Some), None),
        has_reputation: degrade("has_reputation", owner, reputation, false),
        estimated_interest,
    };
    debug!(%owner, "account overview assembled");
    overview
}

pub async fn pool_stats<R: ChainReader>(chain: &R, config: &Config) -> PoolStats {
    let (deposited, borrowed, liquidity, utilization) = tokio::join!(
        total_deposited(chain, config),
        total_borrowed(chain, config),
        available_liquidity(chain, config),
        utilization_bps(chain, config),
    );

    PoolStats {
        total_deposited: degrade("total_deposited", "pool", deposited, 0),
        total_borrowed: degrade("total_borrowed", "pool", borrowed, 0),
        available_liquidity: degrade("available_liquidity", "pool", liquidity, 0),
        utilization_percent: degrade("utilization", "pool", utilization, 0) as f64 / 100.0,
    }
}

pub async fn lender_overview<R: ChainReader>(
    chain: &R,
    config: &Config,
    owner: &str,
) -> LenderOverview {
    let (balance, exists, position, pool) = tokio::join!(
        usdc_balance(chain, config, owner),
        lender_exists(chain, config, owner),
        lender_position(chain, config, owner),
        pool_stats(chain, config),
    );

    let is_lender = degrade("lender_exists", owner, exists, false);
    let position = if is_lender {
        degrade("lender_position", owner, position.map(Some), None)
    } else {
        None
    };

    LenderOverview {
        owner: owner.to_string(),
        usdc_balance: degrade("usdc_balance", owner, balance, 0),
        is_lender,
        position,
        pool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_coin_store_shapes() {
        let store = json!({ "type": "0x1::coin::CoinStore<x>", "data": { "coin": { "value": "2500000" } } });
        assert_eq!(coin_store_value(&store).unwrap(), 2_500_000);

        let flat = json!({ "data": { "balance": "7" } });
        assert_eq!(coin_store_value(&flat).unwrap(), 7);

        assert!(coin_store_value(&json!({ "data": {} })).is_err());
    }
}
