use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, From};
use serde::Serialize;
use utoipa::ToSchema;

/// Unique keys the store enforces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum UniqueKey {
    #[display(fmt = "employee_id")]
    EmployeeId,
    #[display(fmt = "email")]
    Email,
}

/// Failures raised by an `HrStore` backend.
#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "store is not connected, call open() first")]
    #[from(ignore)]
    NotConnected,
    #[display(fmt = "duplicate value for unique key {}", _0)]
    Duplicate(UniqueKey),
    #[display(fmt = "referenced employee does not exist")]
    #[from(ignore)]
    MissingEmployee,
    #[display(fmt = "stored row could not be decoded: {}", _0)]
    #[from(ignore)]
    Corrupt(String),
    #[display(fmt = "store lock poisoned")]
    #[from(ignore)]
    Poisoned,
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors surfaced to API callers.
#[derive(Debug, Display, From)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    Validation(String),
    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    Conflict(String),
    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    NotFound(String),
    #[display(fmt = "internal error: {}", _0)]
    Internal(StoreError),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e),
            _ => None,
        }
    }
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Conflict(_) => "conflict",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Text safe to show to a caller. Internal faults never leak detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "not_found")]
    pub error: &'static str,
    #[schema(example = "Employee EMP001 not found")]
    pub message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(e) = self {
            tracing::error!(error = %e, "Request failed with internal error");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message: self.public_message(),
        })
    }
}
