use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::chain::ChainReader;
use crate::config::Config;
use crate::error::ApiError;
use crate::validation::is_valid_address;

pub mod account;
pub mod health;
pub mod lending;
pub mod tx;

pub struct AppState<R> {
    pub config: Arc<Config>,
    pub chain: Arc<R>,
}

impl<R> AppState<R> {
    pub fn new(config: Config, chain: R) -> Self {
        Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
        }
    }
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            chain: Arc::clone(&self.chain),
        }
    }
}

pub fn router<R: ChainReader + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/account/:owner", get(account::get_account::<R>))
        .route("/account/:owner/credit", get(account::get_credit::<R>))
        .route("/account/:owner/preauth", get(account::get_preauth::<R>))
        .route("/lender/:owner", get(lending::get_lender::<R>))
        .route("/pool", get(lending::get_pool::<R>))
        .route("/lend/estimate", get(lending::get_estimate))
        .route("/payment-request", post(tx::parse_payment_request))
        .route("/tx/pay", post(tx::tx_pay::<R>))
        .route("/tx/open-credit-line", post(tx::tx_open_credit_line::<R>))
        .route("/tx/add-collateral", post(tx::tx_add_collateral::<R>))
        .route("/tx/repay", post(tx::tx_repay::<R>))
        .route("/tx/preauth", post(tx::tx_preauth::<R>))
        .route("/tx/deposit", post(tx::tx_deposit::<R>))
        .route("/tx/withdraw", post(tx::tx_withdraw::<R>))
        .with_state(state)
}

pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

pub(crate) fn require_address(address: &str) -> Result<(), ApiError> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(ApiError::InvalidAddress(address.to_string()))
    }
}
