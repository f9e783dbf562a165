use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;
use crate::reads::{CREDIT_MODULE, LENDING_MODULE};
use crate::units::to_units;

/// An entry-function call for the wallet to sign and submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl TransactionPayload {
    fn entry(function: String, arguments: Vec<Value>) -> Self {
        Self {
            kind: "entry_function_payload".to_string(),
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// Builds payloads against one deployed contract. The contract address is always the
/// first argument; amounts are USDC and converted with `to_units`.
pub struct PayloadBuilder<'a> {
    config: &'a Config,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn call(&self, module: &str, function: &str, args: Vec<Value>) -> TransactionPayload {
        let mut arguments = vec![json!(self.config.contract_address)];
        arguments.extend(args);
        TransactionPayload::entry(self.config.function(module, function), arguments)
    }

    pub fn open_credit_line(&self, collateral: f64) -> TransactionPayload {
        self.call(CREDIT_MODULE, "open_credit_line", vec![json!(to_units(collateral))])
    }

    pub fn add_collateral(&self, amount: f64) -> TransactionPayload {
        self.call(CREDIT_MODULE, "add_collateral", vec![json!(to_units(amount))])
    }

    /// Draws `amount` on the caller's credit line and sends it to `recipient`.
    pub fn pay(&self, recipient: &str, amount: f64) -> TransactionPayload {
        self.call(
            CREDIT_MODULE,
            "borrow_and_pay",
            vec![json!(recipient), json!(to_units(amount))],
        )
    }

    pub fn repay(&self, amount: f64) -> TransactionPayload {
        self.call(CREDIT_MODULE, "repay", vec![json!(to_units(amount))])
    }

    pub fn setup_preauth(
        &self,
        total_limit: f64,
        per_tx_limit: f64,
        duration_secs: u64,
    ) -> TransactionPayload {
        self.call(
            CREDIT_MODULE,
            "setup_pre_authorization",
            vec![
                json!(to_units(total_limit)),
                json!(to_units(per_tx_limit)),
                json!(duration_secs.to_string()),
            ],
        )
    }

    pub fn revoke_preauth(&self) -> TransactionPayload {
        self.call(CREDIT_MODULE, "revoke_pre_authorization", Vec::new())
    }

    pub fn deposit(&self, amount: f64) -> TransactionPayload {
        self.call(LENDING_MODULE, "deposit", vec![json!(to_units(amount))])
    }

    pub fn withdraw(&self, amount: f64) -> TransactionPayload {
        self.call(LENDING_MODULE, "withdraw", vec![json!(to_units(amount))])
    }
}
