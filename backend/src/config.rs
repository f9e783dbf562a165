use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const APTOS_NODE_URL: &str = "https://fullnode.testnet.aptoslabs.com/v1";
pub const CONTRACT_ADDRESS: &str =
    "0xcbf19890b206376715616f0e14a545ed46f47adbc4c0f3ee52ca568ff1f852ed";
pub const USDC_METADATA: &str =
    "0x69091fbab5f7d635ee7ac5098cf0c1efbe31d68fec0f2cd565e8d168daf52832";
pub const BIND_ADDR: &str = "0.0.0.0:3000";

/// Client-side ceiling for a single amount, in USDC.
pub const MAX_AMOUNT_USDC: f64 = 1_000_000.0;

/// Rate used for interest estimates shown next to the credit line (15% APR).
pub const DEFAULT_INTEREST_RATE_BPS: u64 = 1500;

pub const DEFAULT_GRACE_PERIOD_SECS: i64 = 2_592_000; // 30 days

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub node_url: String,
    pub contract_address: String,
    pub usdc_metadata: String,
    pub bind_addr: String,
    pub max_amount_usdc: f64,
    pub interest_rate_bps: u64,
    pub grace_period_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_url: APTOS_NODE_URL.to_string(),
            contract_address: CONTRACT_ADDRESS.to_string(),
            usdc_metadata: USDC_METADATA.to_string(),
            bind_addr: BIND_ADDR.to_string(),
            max_amount_usdc: MAX_AMOUNT_USDC,
            interest_rate_bps: DEFAULT_INTEREST_RATE_BPS,
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            node_url: lookup("APTOS_NODE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.node_url),
            contract_address: lookup("CONTRACT_ADDRESS").unwrap_or(defaults.contract_address),
            usdc_metadata: lookup("USDC_METADATA").unwrap_or(defaults.usdc_metadata),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_amount_usdc: parse_var(&lookup, "MAX_AMOUNT_USDC", defaults.max_amount_usdc)?,
            interest_rate_bps: parse_var(
                &lookup,
                "INTEREST_RATE_BPS",
                defaults.interest_rate_bps,
            )?,
            grace_period_secs: parse_var(
                &lookup,
                "GRACE_PERIOD_SECS",
                defaults.grace_period_secs,
            )?,
        };

        if !(config.max_amount_usdc.is_finite() && config.max_amount_usdc > 0.0) {
            return Err(ConfigError::Invalid {
                key: "MAX_AMOUNT_USDC",
                value: config.max_amount_usdc.to_string(),
            });
        }
        if config.grace_period_secs < 0 {
            return Err(ConfigError::Invalid {
                key: "GRACE_PERIOD_SECS",
                value: config.grace_period_secs.to_string(),
            });
        }
        Ok(config)
    }

    /// `<contract>::<module>::<function>`
    pub fn function(&self, module: &str, function: &str) -> String {
        format!("{}::{}::{}", self.contract_address, module, function)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
