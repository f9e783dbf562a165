//! Payment requests carried by NFC tags and QR codes.
//!
//! A record is either a JSON object (`recipientAddress`, `amount`, `merchantName`,
//! `description`) or a colon-separated line `address[:amount[:merchant[:description]]]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::address::clean_address;
use crate::validation::is_valid_address;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub recipient_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PaymentRequest {
    /// Requested amount in USDC, if one was encoded and parses as a number.
    pub fn amount_usdc(&self) -> Option<f64> {
        self.amount.as_deref().and_then(|a| a.trim().parse().ok())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentRequestError {
    #[error("record is empty")]
    Empty,

    #[error("record does not contain a recipient address")]
    MissingRecipient,

    #[error("recipient is not a valid address: {0}")]
    InvalidRecipient(String),
}

/// Wire shape of a JSON record; `amount` may be a string or a number.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonRecord {
    recipient_address: String,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    merchant_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl JsonRecord {
    fn into_request(self) -> PaymentRequest {
        let amount = match self.amount {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        PaymentRequest {
            recipient_address: self.recipient_address,
            amount,
            merchant_name: self.merchant_name,
            description: self.description,
        }
    }
}

pub fn parse(record: &str) -> Result<PaymentRequest, PaymentRequestError> {
    let record = record.trim();
    if record.is_empty() {
        return Err(PaymentRequestError::Empty);
    }

    let mut request = match serde_json::from_str::<JsonRecord>(record) {
        Ok(json) => json.into_request(),
        Err(_) => parse_colon_separated(record)?,
    };

    if request.recipient_address.is_empty() {
        return Err(PaymentRequestError::MissingRecipient);
    }
    request.recipient_address = clean_address(&request.recipient_address);
    if !is_valid_address(&request.recipient_address) {
        return Err(PaymentRequestError::InvalidRecipient(request.recipient_address));
    }
    Ok(request)
}

fn parse_colon_separated(record: &str) -> Result<PaymentRequest, PaymentRequestError> {
    let parts: Vec<&str> = record.split(':').collect();
    let non_empty = |s: Option<&&str>| s.filter(|s| !s.is_empty()).map(|s| s.to_string());

    match parts.as_slice() {
        [address] if is_valid_address(address) => Ok(PaymentRequest {
            recipient_address: address.to_string(),
            amount: None,
            merchant_name: None,
            description: None,
        }),
        [_] => Err(PaymentRequestError::MissingRecipient),
        _ => Ok(PaymentRequest {
            recipient_address: parts[0].to_string(),
            amount: non_empty(parts.get(1)),
            merchant_name: non_empty(parts.get(2)),
            description: non_empty(parts.get(3)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> String {
        format!("0x{}", "c".repeat(64))
    }

    #[test]
    fn parses_json_records() {
        let record = format!(
            r#"{{"recipientAddress":"{}","amount":"25.5","merchantName":"Cafe"}}"#,
            addr()
        );
        let request = parse(&record).unwrap();
        assert_eq!(request.recipient_address, addr());
        assert_eq!(request.amount_usdc(), Some(25.5));
        assert_eq!(request.merchant_name.as_deref(), Some("Cafe"));
        assert_eq!(request.description, None);
    }

    #[test]
    fn accepts_numeric_json_amount() {
        let record = format!(r#"{{"recipientAddress":"{}","amount":42}}"#, addr());
        assert_eq!(parse(&record).unwrap().amount_usdc(), Some(42.0));
    }

    #[test]
    fn parses_bare_address() {
        let request = parse(&addr()).unwrap();
        assert_eq!(request.recipient_address, addr());
        assert_eq!(request.amount, None);
    }

    #[test]
    fn parses_colon_separated() {
        let request = parse(&format!("{}:10:Book Shop:Order 7", addr())).unwrap();
        assert_eq!(request.amount_usdc(), Some(10.0));
        assert_eq!(request.merchant_name.as_deref(), Some("Book Shop"));
        assert_eq!(request.description.as_deref(), Some("Order 7"));
    }

    #[test]
    fn normalises_double_prefix() {
        let request = parse(&format!("0x{}:3", addr())).unwrap();
        assert_eq!(request.recipient_address, addr());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("   "), Err(PaymentRequestError::Empty));
        assert_eq!(parse("hello"), Err(PaymentRequestError::MissingRecipient));
        assert!(matches!(
            parse("0x123:5"),
            Err(PaymentRequestError::InvalidRecipient(_))
        ));
        assert_eq!(
            parse(r#"{"recipientAddress":""}"#),
            Err(PaymentRequestError::MissingRecipient)
        );
    }
}
