#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use credit_backend::chain::{ChainError, ChainReader, ViewRequest};
use credit_backend::config::{Config, CONTRACT_ADDRESS};
use credit_backend::reads::USDC_BALANCE_FUNCTION;
use credit_backend::tx::TransactionPayload;
use credit_backend::wallet::{SubmittedTransaction, WalletAdapter, WalletError};
use serde_json::{json, Value};

pub const T0: i64 = 1_700_000_000;

pub fn addr(c: char) -> String {
    format!("0x{}", c.to_string().repeat(64))
}

pub fn function(module: &str, name: &str) -> String {
    format!("{CONTRACT_ADDRESS}::{module}::{name}")
}

pub fn credit_values(limit: u64, debt: u64, active: bool, last_borrow: i64, collateral: u64) -> Vec<Value> {
    vec![
        json!(limit.to_string()),
        json!(debt.to_string()),
        json!(active),
        json!(last_borrow.to_string()),
        json!(collateral.to_string()),
    ]
}

pub fn preauth_values(total: u64, used: u64, expires_at: i64, per_tx: u64, active: bool) -> Vec<Value> {
    vec![
        json!(total.to_string()),
        json!(used.to_string()),
        json!(expires_at.to_string()),
        json!(per_tx.to_string()),
        json!(active),
    ]
}

enum Reply {
    Values(Vec<Value>),
    Abort(String),
    Status(u16),
}

/// In-memory contract: view replies keyed by fully-qualified function id.
/// Unknown functions fail like a missing module would.
#[derive(Default)]
pub struct MockChain {
    views: HashMap<String, Reply>,
    resources: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, module: &str, name: &str, values: Vec<Value>) -> Self {
        self.views.insert(function(module, name), Reply::Values(values));
        self
    }

    pub fn with_abort(mut self, module: &str, name: &str, message: &str) -> Self {
        self.views
            .insert(function(module, name), Reply::Abort(message.to_string()));
        self
    }

    /// The node answers this view with a bare HTTP status.
    pub fn with_status(mut self, module: &str, name: &str, status: u16) -> Self {
        self.views.insert(function(module, name), Reply::Status(status));
        self
    }

    pub fn with_balance(mut self, units: u64) -> Self {
        self.views.insert(
            USDC_BALANCE_FUNCTION.to_string(),
            Reply::Values(vec![json!(units.to_string())]),
        );
        self
    }

    pub fn with_coin_store(mut self, account: &str, units: u64) -> Self {
        self.resources.insert(
            account.to_string(),
            json!({ "type": "0x1::coin::CoinStore", "data": { "coin": { "value": units.to_string() } } }),
        );
        self
    }

    pub fn with_liquidity(self, units: u64) -> Self {
        self.with_view("lending_pool", "get_available_liquidity", vec![json!(units.to_string())])
    }

    pub fn with_credit(self, limit: u64, debt: u64, active: bool) -> Self {
        self.with_view(
            "credit_manager",
            "get_credit_info",
            credit_values(limit, debt, active, T0, limit),
        )
    }

    /// Function ids requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, module: &str, name: &str) -> bool {
        self.calls().contains(&function(module, name))
    }
}

impl ChainReader for MockChain {
    async fn view(&self, request: ViewRequest) -> Result<Vec<Value>, ChainError> {
        self.calls.lock().unwrap().push(request.function.clone());
        match self.views.get(&request.function) {
            Some(Reply::Values(values)) => Ok(values.clone()),
            Some(Reply::Abort(message)) => Err(ChainError::Status {
                status: 400,
                message: message.clone(),
            }),
            Some(Reply::Status(status)) => Err(ChainError::Status {
                status: *status,
                message: "node unavailable".to_string(),
            }),
            None => Err(ChainError::Status {
                status: 404,
                message: format!("function not found: {}", request.function),
            }),
        }
    }

    async fn account_resource(
        &self,
        account: &str,
        _resource_type: &str,
    ) -> Result<Option<Value>, ChainError> {
        Ok(self.resources.get(account).cloned())
    }
}

pub struct MockWallet {
    pub connected: bool,
    pub address: Option<String>,
    outcome: Result<String, String>,
    submitted: Mutex<Vec<TransactionPayload>>,
}

impl MockWallet {
    pub fn connected(address: &str) -> Self {
        Self {
            connected: true,
            address: Some(address.to_string()),
            outcome: Ok("0xfeed".to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            address: None,
            outcome: Ok("0xfeed".to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_with(mut self, message: &str) -> Self {
        self.outcome = Err(message.to_string());
        self
    }

    pub fn submitted(&self) -> Vec<TransactionPayload> {
        self.submitted.lock().unwrap().clone()
    }
}

impl WalletAdapter for MockWallet {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn account_address(&self) -> Option<String> {
        self.address.clone()
    }

    async fn sign_and_submit(
        &self,
        payload: &TransactionPayload,
    ) -> Result<SubmittedTransaction, WalletError> {
        self.submitted.lock().unwrap().push(payload.clone());
        match &self.outcome {
            Ok(hash) => Ok(SubmittedTransaction { hash: hash.clone() }),
            Err(message) => Err(WalletError::new(message.clone())),
        }
    }
}

pub fn config() -> Config {
    Config::default()
}
