use costing::PolicyError;
use thiserror::Error;

/// Errors raised by the finance services.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Validation(#[from] PolicyError),
    #[error("organization not found")]
    OrganizationNotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("task not found")]
    TaskNotFound,
    #[error("rate card not found")]
    RateCardNotFound,
    #[error("rate card role not found")]
    RateCardRoleNotFound,
    #[error("A rate card has already been imported. Clear all imported rate cards to add a new one.")]
    RateCardAlreadyImported,
    #[error("failed to persist changes: {0}")]
    PersistenceFailure(String),
}

impl FinanceError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::PersistenceFailure(msg.into())
    }
}
