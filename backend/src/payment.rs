use thiserror::Error;
use tracing::{debug, warn};

use crate::chain::ChainReader;
use crate::config::Config;
use crate::models::CreditLineInfo;
use crate::reads;
use crate::units::units;
use crate::validation::{is_valid_address, is_valid_amount_with_ceiling};

/// Why a payment was refused before submission. `Display` is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentRejection {
    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please enter a valid recipient address")]
    InvalidRecipient,

    #[error("Not enough liquidity in the pool. Try a smaller amount.")]
    InsufficientLiquidity,

    #[error("No active credit line for this account")]
    CreditLineInactive,

    #[error("Payment amount exceeds available credit")]
    ExceedsAvailableCredit,
}

#[derive(Debug, Clone)]
pub struct ValidatedPayment {
    pub recipient: String,
    pub amount: f64,
    pub amount_units: u64,
    pub credit: CreditLineInfo,
    pub liquidity: u64,
}

/// Runs the pre-submission checks in order and stops at the first failure:
/// amount, recipient, pool liquidity, credit line active, available credit.
///
/// The liquidity check is advisory. Nothing is reserved, so the pool can drain
/// between this read and submission; the contract makes the binding check.
pub async fn validate_payment<R: ChainReader>(
    chain: &R,
    config: &Config,
    sender: &str,
    recipient: &str,
    amount: f64,
) -> Result<ValidatedPayment, PaymentRejection> {
    if !is_valid_amount_with_ceiling(amount, config.max_amount_usdc) {
        return Err(PaymentRejection::InvalidAmount);
    }
    if !is_valid_address(recipient) {
        return Err(PaymentRejection::InvalidRecipient);
    }
    let amount_units = units(amount) as u64;
    // below one base unit the payload would carry "0"
    if amount_units == 0 {
        return Err(PaymentRejection::InvalidAmount);
    }

    let liquidity = match reads::available_liquidity(chain, config).await {
        Ok(liquidity) => liquidity,
        Err(err) => {
            warn!(error = %err, "liquidity read failed, treating pool as empty");
            0
        }
    };
    if liquidity < amount_units {
        return Err(PaymentRejection::InsufficientLiquidity);
    }

    let credit = match reads::credit_info(chain, config, sender).await {
        Ok(info) if info.is_active => info,
        Ok(_) => return Err(PaymentRejection::CreditLineInactive),
        Err(err) => {
            warn!(%sender, error = %err, "credit info read failed");
            return Err(PaymentRejection::CreditLineInactive);
        }
    };

    if amount_units > credit.available_credit {
        return Err(PaymentRejection::ExceedsAvailableCredit);
    }

    debug!(%sender, %recipient, amount_units, "payment passed validation");
    Ok(ValidatedPayment {
        recipient: recipient.to_string(),
        amount,
        amount_units,
        credit,
        liquidity,
    })
}
