use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use costing::PolicyError;
use serde::Serialize;
use std::fmt;

use crate::domain::FinanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidMethod,
    InvalidHoursPerDay,
    InvalidEstimate,
    InvalidAmount,
    InvalidCurrency,
    RateCardAlreadyImported,
    PersistenceFailure,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        let code = match err {
            PolicyError::InvalidMethod(_) => ErrorCode::InvalidMethod,
            PolicyError::InvalidHoursPerDay(_) => ErrorCode::InvalidHoursPerDay,
            PolicyError::InvalidEstimate { .. } => ErrorCode::InvalidEstimate,
            PolicyError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            PolicyError::InvalidCurrency(_) => ErrorCode::InvalidCurrency,
        };
        Self::bad_request(err.to_string()).with_code(code)
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::Validation(policy) => policy.into(),
            FinanceError::OrganizationNotFound
            | FinanceError::ProjectNotFound
            | FinanceError::TaskNotFound
            | FinanceError::RateCardNotFound
            | FinanceError::RateCardRoleNotFound => Self::not_found(err.to_string()),
            FinanceError::RateCardAlreadyImported => {
                Self::conflict(err.to_string()).with_code(ErrorCode::RateCardAlreadyImported)
            }
            FinanceError::PersistenceFailure(message) => {
                tracing::error!("Persistence failure: {}", message);
                Self::internal("Failed to save changes").with_code(ErrorCode::PersistenceFailure)
            }
        }
    }
}
