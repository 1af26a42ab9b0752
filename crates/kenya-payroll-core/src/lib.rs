pub mod deductions;
pub mod error;
pub mod money;
pub mod types;

#[cfg(feature = "payroll")]
pub mod payroll;

#[cfg(feature = "reports")]
pub mod reports;

pub use error::PayrollError;
pub use types::*;

/// Standard result type for all payroll operations
pub type PayrollResult<T> = Result<T, PayrollError>;
