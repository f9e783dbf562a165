//! Address normalisation and hex helpers for values read from cards, QR codes
//! and clipboards.

/// Collapses a doubled `0x0x` prefix and adds a missing `0x`.
pub fn clean_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    if let Some(rest) = address.strip_prefix("0x0x") {
        return format!("0x{rest}");
    }
    if address.starts_with("0x") {
        address.to_string()
    } else {
        format!("0x{address}")
    }
}

pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
