use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::tx::TransactionPayload;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    pub hash: String,
}

/// Error surfaced by a wallet adapter. `message` carries whatever the wallet or the
/// node reported, including Move abort names.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct WalletError {
    pub message: String,
}

impl WalletError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// The connected wallet. Keys never leave it; this crate only hands it payloads.
pub trait WalletAdapter: Send + Sync {
    fn is_connected(&self) -> bool;

    fn account_address(&self) -> Option<String>;

    fn sign_and_submit(
        &self,
        payload: &TransactionPayload,
    ) -> impl Future<Output = Result<SubmittedTransaction, WalletError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitErrorKind {
    WalletNotConnected,
    UserRejected,
    InsufficientBalance,
    CreditLineExists,
    InsufficientCollateral,
    NotAuthorized,
    InvalidAmount,
    InsufficientLiquidity,
    ExceedsCreditLimit,
    Unknown,
}

impl SubmitErrorKind {
    /// Maps a wallet/VM message to a kind. Abort codes are matched by name.
    pub fn classify(message: &str) -> Self {
        const ABORTS: [(&str, SubmitErrorKind); 7] = [
            ("EINSUFFICIENT_BALANCE", SubmitErrorKind::InsufficientBalance),
            ("CREDIT_LINE_EXISTS", SubmitErrorKind::CreditLineExists),
            ("INSUFFICIENT_COLLATERAL", SubmitErrorKind::InsufficientCollateral),
            ("NOT_AUTHORIZED", SubmitErrorKind::NotAuthorized),
            ("INVALID_AMOUNT", SubmitErrorKind::InvalidAmount),
            ("INSUFFICIENT_LIQUIDITY", SubmitErrorKind::InsufficientLiquidity),
            ("EXCEEDS_CREDIT_LIMIT", SubmitErrorKind::ExceedsCreditLimit),
        ];

        if let Some((_, kind)) = ABORTS.iter().find(|(code, _)| message.contains(code)) {
            return *kind;
        }

        let lower = message.to_ascii_lowercase();
        if lower.contains("rejected") || lower.contains("denied") {
            return SubmitErrorKind::UserRejected;
        }
        SubmitErrorKind::Unknown
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitErrorKind::WalletNotConnected => "Connect a wallet to continue.",
            SubmitErrorKind::UserRejected => "Transaction was rejected in the wallet.",
            SubmitErrorKind::InsufficientBalance => {
                "Insufficient USDC balance for this transaction"
            }
            SubmitErrorKind::CreditLineExists => "Credit line already exists for this account",
            SubmitErrorKind::InsufficientCollateral => {
                "Insufficient collateral for the requested credit limit"
            }
            SubmitErrorKind::NotAuthorized => "Transaction not authorized. Please try again.",
            SubmitErrorKind::InvalidAmount => "Please enter a valid amount",
            SubmitErrorKind::InsufficientLiquidity => {
                "Not enough liquidity in the pool. Try a smaller amount."
            }
            SubmitErrorKind::ExceedsCreditLimit => "This transaction exceeds your credit limit",
            SubmitErrorKind::Unknown => "Transaction failed. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {detail}")]
pub struct SubmitError {
    pub kind: SubmitErrorKind,
    pub detail: String,
}

/// Hands `payload` to the wallet once. No retry; the caller re-reads state afterwards.
pub async fn submit<W: WalletAdapter>(
    wallet: &W,
    payload: &TransactionPayload,
) -> Result<SubmittedTransaction, SubmitError> {
    if !wallet.is_connected() {
        return Err(SubmitError {
            kind: SubmitErrorKind::WalletNotConnected,
            detail: "wallet is not connected".to_string(),
        });
    }

    match wallet.sign_and_submit(payload).await {
        Ok(tx) => {
            info!(function = %payload.function, hash = %tx.hash, "transaction submitted");
            Ok(tx)
        }
        Err(err) => {
            let kind = SubmitErrorKind::classify(&err.message);
            warn!(function = %payload.function, ?kind, error = %err, "transaction failed");
            Err(SubmitError { kind, detail: err.message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_move_aborts() {
        let msg = "Move abort in 0xcbf1::credit_manager: EXCEEDS_CREDIT_LIMIT(0x10004)";
        assert_eq!(SubmitErrorKind::classify(msg), SubmitErrorKind::ExceedsCreditLimit);
        assert_eq!(
            SubmitErrorKind::classify("EINSUFFICIENT_BALANCE(0x10001)"),
            SubmitErrorKind::InsufficientBalance
        );
        assert_eq!(
            SubmitErrorKind::classify("lending_pool: INSUFFICIENT_LIQUIDITY"),
            SubmitErrorKind::InsufficientLiquidity
        );
    }

    #[test]
    fn classifies_wallet_rejection_and_unknowns() {
        assert_eq!(
            SubmitErrorKind::classify("User rejected the request"),
            SubmitErrorKind::UserRejected
        );
        assert_eq!(SubmitErrorKind::classify("socket hang up"), SubmitErrorKind::Unknown);
        assert_eq!(
            SubmitErrorKind::Unknown.user_message(),
            "Transaction failed. Please try again."
        );
    }
}
