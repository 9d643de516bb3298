use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayrollError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Payroll slip {0} is already paid")]
    SlipAlreadyPaid(Uuid),
}

impl PayrollError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PayrollError::InvalidArgument(message.into())
    }
}
