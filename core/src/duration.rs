use serde::Serialize;

/// A business-day count and the string shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveDuration {
    pub days: i64,
    pub formatted: String,
}

impl LeaveDuration {
    pub fn from_days(days: i64) -> Self {
        Self {
            days,
            formatted: format_days(days),
        }
    }

    /// Only a positive count can be reserved against a balance.
    pub fn is_allocatable(&self) -> bool {
        self.days > 0
    }
}

impl std::fmt::Display for LeaveDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted)
    }
}

pub fn format_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Balances may be fractional (half days); whole values print without decimals.
pub fn format_balance(days: f64) -> String {
    if days.fract() == 0.0 && days.abs() < i64::MAX as f64 {
        return format_days(days as i64);
    }
    format!("{} days", days)
}
