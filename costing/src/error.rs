use thiserror::Error;

/// Validation failures raised before anything is persisted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("invalid calculation method '{0}': expected 'hourly' or 'man_days'")]
    InvalidMethod(String),
    #[error("invalid hours per day: {0}")]
    InvalidHoursPerDay(String),
    #[error("invalid estimate: {field} must be a non-negative number")]
    InvalidEstimate { field: &'static str },
    #[error("invalid amount: {field} must be a non-negative number")]
    InvalidAmount { field: &'static str },
    #[error("unsupported currency '{0}'")]
    InvalidCurrency(String),
}
