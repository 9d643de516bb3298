pub mod payroll_slip;

// Re-export all repositories for easy importing
pub use payroll_slip::PayrollSlipRepository;
