pub mod payslip;
pub mod preview;
pub mod records;
pub mod register;

pub use records::{DeductionSource, Employee, PayrollRecord, PayrollStatus, RecordedDeductions};
