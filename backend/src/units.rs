use thiserror::Error;

pub const USDC_DECIMALS: u8 = 6;
pub const UNITS_PER_USDC: u64 = 1_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("not an integer unit amount: {0:?}")]
    NotAnInteger(String),
}

/// Display amount -> contract fixed-point integer, floored.
///
/// Negative input is not rejected here; it yields a negative value. Amounts are
/// expected to have passed `validation::is_valid_amount` first.
pub fn units(amount: f64) -> i64 {
    (amount * UNITS_PER_USDC as f64).floor() as i64
}

pub fn to_units(amount: f64) -> String {
    units(amount).to_string()
}

pub fn from_units(units: &str) -> Result<f64, UnitsError> {
    let raw: i128 = units
        .trim()
        .parse()
        .map_err(|_| UnitsError::NotAnInteger(units.to_string()))?;
    Ok(raw as f64 / UNITS_PER_USDC as f64)
}

pub fn units_to_usdc(units: u64) -> f64 {
    units as f64 / UNITS_PER_USDC as f64
}

/// en-US dollar formatting with 2 to 6 fraction digits, e.g. `$1,500.75`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$NaN".to_string();
    }

    let fixed = format!("{:.6}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac}")
}
