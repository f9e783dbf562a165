pub use crate::config::DEFAULT_GRACE_PERIOD_SECS;

pub const SECONDS_PER_YEAR: i64 = 31_536_000; // 365 days
pub const BPS_PRECISION: f64 = 10_000.0;

/// Simple interest on `principal` accrued after the grace period ends.
///
/// Zero while `now <= borrow_timestamp + grace_period_secs`; afterwards linear in the
/// seconds elapsed since the grace period ended.
pub fn accrued_interest(
    principal: f64,
    annual_rate_bps: u64,
    borrow_timestamp: i64,
    grace_period_secs: i64,
    now: i64,
) -> f64 {
    let grace_end = borrow_timestamp.saturating_add(grace_period_secs);
    if now <= grace_end {
        return 0.0;
    }

    let elapsed = now.saturating_sub(grace_end) as f64;
    let rate = annual_rate_bps as f64 / BPS_PRECISION;

    principal * rate * (elapsed / SECONDS_PER_YEAR as f64)
}
