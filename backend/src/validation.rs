use crate::config::MAX_AMOUNT_USDC;

pub fn is_valid_amount(amount: f64) -> bool {
    is_valid_amount_with_ceiling(amount, MAX_AMOUNT_USDC)
}

pub fn is_valid_amount_with_ceiling(amount: f64, ceiling: f64) -> bool {
    !amount.is_nan() && amount > 0.0 && amount <= ceiling
}

/// `0x` followed by exactly 64 hex digits. No checksum.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
