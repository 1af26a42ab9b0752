pub mod deductions;
pub mod payroll;
pub mod reports;
