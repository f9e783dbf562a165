use serde::{Deserialize, Serialize};

/// Pool APY used for estimates when the caller does not supply one.
pub const DEFAULT_BASE_APY_PERCENT: f64 = 12.5;

/// Deposit lock periods offered to lenders, with their APY boost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LockPeriod {
    pub months: u32,
    pub multiplier: f64,
}

pub const LOCK_PERIODS: [LockPeriod; 4] = [
    LockPeriod { months: 1, multiplier: 1.0 },
    LockPeriod { months: 3, multiplier: 1.25 },
    LockPeriod { months: 6, multiplier: 1.5 },
    LockPeriod { months: 12, multiplier: 2.0 },
];

impl LockPeriod {
    pub fn for_months(months: u32) -> Option<Self> {
        LOCK_PERIODS.iter().copied().find(|p| p.months == months)
    }

    pub fn label(&self) -> String {
        if self.months == 1 {
            "1 month".to_string()
        } else {
            format!("{} months", self.months)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YieldEstimate {
    pub amount: f64,
    pub period: String,
    pub effective_apy: f64,
    pub estimated_yield: f64,
}

pub fn effective_apy(base_apy_percent: f64, period: LockPeriod) -> f64 {
    base_apy_percent * period.multiplier
}

pub fn estimated_yield(amount: f64, base_apy_percent: f64, period: LockPeriod) -> f64 {
    if amount.is_nan() || amount <= 0.0 {
        return 0.0;
    }
    let boosted = base_apy_percent / 100.0 * period.multiplier;
    let monthly = amount * boosted / 12.0;
    monthly * period.months as f64
}

pub fn estimate(amount: f64, base_apy_percent: f64, period: LockPeriod) -> YieldEstimate {
    YieldEstimate {
        amount,
        period: period.label(),
        effective_apy: effective_apy(base_apy_percent, period),
        estimated_yield: estimated_yield(amount, base_apy_percent, period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_month_lock_doubles_apy() {
        let period = LockPeriod::for_months(12).unwrap();
        assert_eq!(effective_apy(12.5, period), 25.0);
        assert!((estimated_yield(1000.0, 12.5, period) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn three_month_yield() {
        let period = LockPeriod::for_months(3).unwrap();
        // 1000 * 0.125 * 1.25 / 12 * 3
        assert!((estimated_yield(1000.0, 12.5, period) - 39.0625).abs() < 1e-9);
        assert_eq!(period.label(), "3 months");
    }

    #[test]
    fn non_positive_amounts_earn_nothing() {
        let period = LOCK_PERIODS[0];
        assert_eq!(estimated_yield(0.0, 12.5, period), 0.0);
        assert_eq!(estimated_yield(-10.0, 12.5, period), 0.0);
        assert_eq!(period.label(), "1 month");
    }

    #[test]
    fn unknown_period() {
        assert!(LockPeriod::for_months(2).is_none());
    }
}
