pub(crate) mod macros;
pub mod payroll_slip;

// Re-export all models for easy importing
pub use payroll_slip::*;
