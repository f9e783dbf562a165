use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::chain::ChainReader;
use crate::error::ApiError;
use crate::models::{
    AmountRequest, IntentResponse, PaymentIntentRequest, PreAuthRequest, ScannedText,
};
use crate::payment::{validate_payment, PaymentRejection};
use crate::payment_request::{self, PaymentRequest};
use crate::session::PREAUTH_DURATION_REQUIRED;
use crate::tx::{PayloadBuilder, TransactionPayload};
use crate::validation::is_valid_amount_with_ceiling;

use super::{require_address, AppState};

const NOTE: &str = "Sign and submit with the connected wallet, then refresh account state.";

fn intent(payload: TransactionPayload, amount: f64) -> Json<IntentResponse> {
    info!(function = %payload.function, amount, "built transaction intent");
    Json(IntentResponse { payload, note: NOTE })
}

fn check_amount<R>(state: &AppState<R>, amount: f64) -> Result<(), ApiError> {
    if is_valid_amount_with_ceiling(amount, state.config.max_amount_usdc) {
        Ok(())
    } else {
        Err(PaymentRejection::InvalidAmount.into())
    }
}

fn amount_intent<R, F>(
    state: &AppState<R>,
    req: &AmountRequest,
    build: F,
) -> Result<Json<IntentResponse>, ApiError>
where
    F: FnOnce(&PayloadBuilder<'_>, f64) -> TransactionPayload,
{
    require_address(&req.owner)?;
    check_amount(state, req.amount)?;
    let payload = build(&PayloadBuilder::new(&state.config), req.amount);
    Ok(intent(payload, req.amount))
}

/// Runs the payment pipeline and, when it passes, returns the payment payload.
pub async fn tx_pay<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<PaymentIntentRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    require_address(&req.sender)?;
    let payment =
        validate_payment(&*state.chain, &state.config, &req.sender, &req.recipient, req.amount)
            .await?;
    let payload = PayloadBuilder::new(&state.config).pay(&payment.recipient, payment.amount);
    Ok(intent(payload, payment.amount))
}

pub async fn tx_open_credit_line<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    amount_intent(&state, &req, |b, amount| b.open_credit_line(amount))
}

pub async fn tx_add_collateral<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    amount_intent(&state, &req, |b, amount| b.add_collateral(amount))
}

pub async fn tx_repay<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    amount_intent(&state, &req, |b, amount| b.repay(amount))
}

pub async fn tx_deposit<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    amount_intent(&state, &req, |b, amount| b.deposit(amount))
}

pub async fn tx_withdraw<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    amount_intent(&state, &req, |b, amount| b.withdraw(amount))
}

pub async fn tx_preauth<R: ChainReader>(
    State(state): State<AppState<R>>,
    Json(req): Json<PreAuthRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
    require_address(&req.owner)?;
    check_amount(&state, req.total_limit)?;
    check_amount(&state, req.per_tx_limit)?;
    if req.per_tx_limit > req.total_limit {
        return Err(ApiError::BadRequest(
            "per-transaction limit exceeds the total limit".to_string(),
        ));
    }
    if req.duration_secs == 0 {
        return Err(ApiError::BadRequest(PREAUTH_DURATION_REQUIRED.to_string()));
    }

    let payload = PayloadBuilder::new(&state.config).setup_preauth(
        req.total_limit,
        req.per_tx_limit,
        req.duration_secs,
    );
    Ok(intent(payload, req.total_limit))
}

/// Decodes the text of a scanned NFC tag or QR code.
pub async fn parse_payment_request(
    Json(req): Json<ScannedText>,
) -> Result<Json<PaymentRequest>, ApiError> {
    Ok(Json(payment_request::parse(&req.text)?))
}
