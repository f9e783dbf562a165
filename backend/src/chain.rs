use std::future::Future;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("request to fullnode failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("fullnode returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("could not decode view result: {0}")]
    Decode(String),
}

impl ChainError {
    /// True when the node itself failed rather than answering about the account.
    pub fn is_upstream(&self) -> bool {
        match self {
            ChainError::Transport(_) | ChainError::Decode(_) => true,
            ChainError::Status { status, .. } => *status >= 500 || *status == 429,
            ChainError::NotFound(_) => false,
        }
    }
}

/// Body of a Move view call: `<address>::<module>::<function>` plus positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    pub fn new(function: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            function: function.into(),
            type_arguments: Vec::new(),
            arguments,
        }
    }

    pub fn with_type_arguments(mut self, type_arguments: Vec<String>) -> Self {
        self.type_arguments = type_arguments;
        self
    }
}

/// Read-only access to contract state.
pub trait ChainReader: Send + Sync {
    fn view(
        &self,
        request: ViewRequest,
    ) -> impl Future<Output = Result<Vec<Value>, ChainError>> + Send;

    /// `Ok(None)` when the account does not hold the resource.
    fn account_resource(
        &self,
        account: &str,
        resource_type: &str,
    ) -> impl Future<Output = Result<Option<Value>, ChainError>> + Send;
}

#[derive(Debug, Clone)]
pub struct AptosClient {
    http: reqwest::Client,
    node_url: String,
}

impl AptosClient {
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            node_url: node_url.into(),
        }
    }
}

impl ChainReader for AptosClient {
    async fn view(&self, request: ViewRequest) -> Result<Vec<Value>, ChainError> {
        let response = self
            .http
            .post(format!("{}/view", self.node_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }

    async fn account_resource(
        &self,
        account: &str,
        resource_type: &str,
    ) -> Result<Option<Value>, ChainError> {
        let response = self
            .http
            .get(format!(
                "{}/accounts/{}/resource/{}",
                self.node_url, account, resource_type
            ))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(ChainError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

/// Move `u64`/`u128` values arrive as JSON strings; plain numbers are accepted too.
pub fn decode_u64(values: &[Value], index: usize) -> Result<u64, ChainError> {
    match values.get(index) {
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| ChainError::Decode(format!("value {index} is not a u64: {s:?}"))),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ChainError::Decode(format!("value {index} is not a u64: {n}"))),
        Some(other) => Err(ChainError::Decode(format!(
            "value {index} is not a u64: {other}"
        ))),
        None => Err(ChainError::Decode(format!("missing value {index}"))),
    }
}

pub fn decode_i64(values: &[Value], index: usize) -> Result<i64, ChainError> {
    let raw = decode_u64(values, index)?;
    i64::try_from(raw)
        .map_err(|_| ChainError::Decode(format!("value {index} overflows a timestamp: {raw}")))
}

pub fn decode_bool(values: &[Value], index: usize) -> Result<bool, ChainError> {
    match values.get(index) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ChainError::Decode(format!(
            "value {index} is not a bool: {other}"
        ))),
        None => Err(ChainError::Decode(format!("missing value {index}"))),
    }
}
