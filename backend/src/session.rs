use thiserror::Error;

use crate::chain::ChainReader;
use crate::config::Config;
use crate::models::{AccountOverview, LenderOverview};
use crate::payment::{validate_payment, PaymentRejection};
use crate::reads;
use crate::tx::{PayloadBuilder, TransactionPayload};
use crate::validation::is_valid_amount_with_ceiling;
use crate::wallet::{submit, SubmitError, SubmitErrorKind, WalletAdapter};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("{0}")]
    Rejected(#[from] PaymentRejection),

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("transaction failed: {0}")]
    Submit(#[from] SubmitError),
}

impl FlowError {
    /// Text to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Rejected(rejection) => rejection.to_string(),
            FlowError::InvalidInput(message) => message.to_string(),
            FlowError::Submit(err) => err.kind.user_message().to_string(),
        }
    }
}

pub const PREAUTH_DURATION_REQUIRED: &str = "duration must be positive";

/// Outcome of a submitted action: the transaction hash and the state re-read after it.
#[derive(Debug, Clone)]
pub struct Receipt<T> {
    pub hash: String,
    pub refreshed: T,
}

/// One connected wallet plus the chain it reads from.
///
/// Every action validates locally, builds a payload, submits it once and re-reads the
/// affected state. Success is assumed as soon as the wallet returns a hash.
pub struct Session<'a, R, W> {
    pub config: &'a Config,
    pub chain: &'a R,
    pub wallet: &'a W,
}

impl<'a, R: ChainReader, W: WalletAdapter> Session<'a, R, W> {
    pub fn new(config: &'a Config, chain: &'a R, wallet: &'a W) -> Self {
        Self { config, chain, wallet }
    }

    fn owner(&self) -> Result<String, FlowError> {
        self.wallet.account_address().ok_or_else(|| {
            FlowError::Submit(SubmitError {
                kind: SubmitErrorKind::WalletNotConnected,
                detail: "wallet has no active account".to_string(),
            })
        })
    }

    fn check_amount(&self, amount: f64) -> Result<(), FlowError> {
        if is_valid_amount_with_ceiling(amount, self.config.max_amount_usdc) {
            Ok(())
        } else {
            Err(PaymentRejection::InvalidAmount.into())
        }
    }

    fn payloads(&self) -> PayloadBuilder<'_> {
        PayloadBuilder::new(self.config)
    }

    pub async fn account_overview(&self, now: i64) -> Result<AccountOverview, FlowError> {
        let owner = self.owner()?;
        Ok(reads::account_overview(self.chain, self.config, &owner, now).await)
    }

    async fn submit_then_refresh_account(
        &self,
        owner: &str,
        payload: TransactionPayload,
        now: i64,
    ) -> Result<Receipt<AccountOverview>, FlowError> {
        let tx = submit(self.wallet, &payload).await?;
        let refreshed = reads::account_overview(self.chain, self.config, owner, now).await;
        Ok(Receipt { hash: tx.hash, refreshed })
    }

    async fn submit_then_refresh_lender(
        &self,
        owner: &str,
        payload: TransactionPayload,
    ) -> Result<Receipt<LenderOverview>, FlowError> {
        let tx = submit(self.wallet, &payload).await?;
        let refreshed = reads::lender_overview(self.chain, self.config, owner).await;
        Ok(Receipt { hash: tx.hash, refreshed })
    }

    /// Pays `recipient` from the credit line after the full validation pipeline.
    pub async fn pay(
        &self,
        recipient: &str,
        amount: f64,
        now: i64,
    ) -> Result<Receipt<AccountOverview>, FlowError> {
        let owner = self.owner()?;
        let payment = validate_payment(self.chain, self.config, &owner, recipient, amount).await?;
        let payload = self.payloads().pay(&payment.recipient, payment.amount);
        self.submit_then_refresh_account(&owner, payload, now).await
    }

    pub async fn open_credit_line(
        &self,
        collateral: f64,
        now: i64,
    ) -> Result<Receipt<AccountOverview>, FlowError> {
        let owner = self.owner()?;
        self.check_amount(collateral)?;
        let payload = self.payloads().open_credit_line(collateral);
        self.submit_then_refresh_account(&owner, payload, now).await
    }

    pub async fn add_collateral(
        &self,
        amount: f64,
        now: i64,
    ) -> Result<Receipt<AccountOverview>, FlowError> {
        let owner = self.owner()?;
        self.check_amount(amount)?;
        let payload = self.payloads().add_collateral(amount);
        self.submit_then_refresh_account(&owner, payload, now).await
    }

    pub async fn repay(&self, amount: f64, now: i64) -> Result<Receipt<AccountOverview>, FlowError> {
        let owner = self.owner()?;
        self.check_amount(amount)?;
        let payload = self.payloads().repay(amount);
        self.submit_then_refresh_account(&owner, payload, now).await
    }

    pub async fn setup_preauth(
        &self,
        total_limit: f64,
        per_tx_limit: f64,
        duration_secs: u64,
        now: i64,
    ) -> Result<Receipt<AccountOverview>, FlowError> {
        let owner = self.owner()?;
        self.check_amount(total_limit)?;
        self.check_amount(per_tx_limit)?;
        if per_tx_limit > total_limit {
            return Err(PaymentRejection::InvalidAmount.into());
        }
        if duration_secs == 0 {
            return Err(FlowError::InvalidInput(PREAUTH_DURATION_REQUIRED));
        }
        let payload = self.payloads().setup_preauth(total_limit, per_tx_limit, duration_secs);
        self.submit_then_refresh_account(&owner, payload, now).await
    }

    pub async fn revoke_preauth(&self, now: i64) -> Result<Receipt<AccountOverview>, FlowError> {
        let owner = self.owner()?;
        let payload = self.payloads().revoke_preauth();
        self.submit_then_refresh_account(&owner, payload, now).await
    }

    pub async fn deposit(&self, amount: f64) -> Result<Receipt<LenderOverview>, FlowError> {
        let owner = self.owner()?;
        self.check_amount(amount)?;
        let payload = self.payloads().deposit(amount);
        self.submit_then_refresh_lender(&owner, payload).await
    }

    pub async fn withdraw(&self, amount: f64) -> Result<Receipt<LenderOverview>, FlowError> {
        let owner = self.owner()?;
        self.check_amount(amount)?;
        let payload = self.payloads().withdraw(amount);
        self.submit_then_refresh_lender(&owner, payload).await
    }
}
