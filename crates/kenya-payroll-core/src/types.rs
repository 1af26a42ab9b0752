use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::PayrollResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.06 = 6%). Never as percentages.
pub type Rate = Decimal;

/// Currency code. Payroll is denominated in a single currency per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    KES,
    UGX,
    TZS,
    USD,
    Other(String),
}

impl Currency {
    /// Label used when rendering amounts ("KES 1,200.00").
    pub fn label(&self) -> &str {
        match self {
            Currency::KES => "KES",
            Currency::UGX => "UGX",
            Currency::TZS => "TZS",
            Currency::USD => "USD",
            Currency::Other(code) => code.as_str(),
        }
    }
}

/// Inclusive pay period, e.g. 2025-01-01 to 2025-01-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> PayrollResult<Self> {
        let period = PayPeriod { start, end };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> PayrollResult<()> {
        if self.end < self.start {
            return Err(PayrollError::DateError(format!(
                "Pay period ends ({}) before it starts ({})",
                self.end, self.start
            )));
        }
        Ok(())
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pay_period_days_inclusive() {
        let period = PayPeriod::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(period.days(), 31);
    }

    #[test]
    fn test_pay_period_single_day() {
        let period = PayPeriod::new(date(2025, 3, 14), date(2025, 3, 14)).unwrap();
        assert_eq!(period.days(), 1);
    }

    #[test]
    fn test_pay_period_reversed_rejected() {
        let err = PayPeriod::new(date(2025, 2, 1), date(2025, 1, 31)).unwrap_err();
        assert!(matches!(err, PayrollError::DateError(_)));
    }

    #[test]
    fn test_currency_label() {
        assert_eq!(Currency::default().label(), "KES");
        assert_eq!(Currency::Other("KSh".into()).label(), "KSh");
    }
}
