pub mod payroll;
pub mod shared;
