//! Amounts are raw contract units (USDC with 6 decimals) unless a field name
//! says otherwise.

use serde::{Deserialize, Serialize};

use crate::tx::TransactionPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLineInfo {
    pub credit_limit: u64,
    pub current_debt: u64,
    /// `credit_limit - current_debt`, floored at zero.
    pub available_credit: u64,
    pub is_active: bool,
    pub last_borrow_timestamp: i64,
    pub collateral: u64,
}

impl CreditLineInfo {
    pub fn new(
        credit_limit: u64,
        current_debt: u64,
        is_active: bool,
        last_borrow_timestamp: i64,
        collateral: u64,
    ) -> Self {
        Self {
            credit_limit,
            current_debt,
            available_credit: credit_limit.saturating_sub(current_debt),
            is_active,
            last_borrow_timestamp,
            collateral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreAuthStatus {
    pub total_limit: u64,
    pub used_amount: u64,
    pub expires_at: i64,
    pub per_tx_limit: u64,
    pub is_active: bool,
}

impl PreAuthStatus {
    pub fn remaining(&self) -> u64 {
        self.total_limit.saturating_sub(self.used_amount)
    }

    pub fn is_usable(&self, now: i64) -> bool {
        self.is_active && now < self.expires_at && self.remaining() > 0
    }

    /// Whether a payment of `amount` units fits inside this pre-authorization at `now`.
    pub fn covers(&self, amount: u64, now: i64) -> bool {
        self.is_usable(now) && amount <= self.per_tx_limit && amount <= self.remaining()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderPosition {
    pub deposited_amount: u64,
    pub earned_interest: u64,
    pub deposit_timestamp: i64,
    pub last_update_timestamp: i64,
    /// Annual yield in basis points.
    pub apy_bps: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    pub total_deposited: u64,
    pub total_borrowed: u64,
    pub available_liquidity: u64,
    pub utilization_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    pub owner: String,
    pub usdc_balance: u64,
    pub credit: Option<CreditLineInfo>,
    pub preauth: Option<PreAuthStatus>,
    pub has_reputation: bool,
    /// Interest estimate on the current debt, in USDC.
    pub estimated_interest: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LenderOverview {
    pub owner: String,
    pub usdc_balance: u64,
    pub is_lender: bool,
    pub position: Option<LenderPosition>,
    pub pool: PoolStats,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub owner: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct PreAuthRequest {
    pub owner: String,
    pub total_limit: f64,
    pub per_tx_limit: f64,
    pub duration_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ScannedText {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    pub amount: f64,
    pub months: u32,
    pub base_apy: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct IntentResponse {
    pub payload: TransactionPayload,
    pub note: &'static str,
}
