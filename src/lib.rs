pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod payroll;
pub mod routes;

pub use config::Config;
pub use database::repositories::PayrollSlipRepository;
pub use error::AppError;
