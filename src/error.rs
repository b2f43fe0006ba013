//! Application error types

use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("No account found for email: {0}")]
    NotFound(String),

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Insufficient holdings of {symbol}: need {needed}, have {available}")]
    InsufficientHoldings {
        symbol: String,
        needed: f64,
        available: f64,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Serializable error response for a UI layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidCredential => "INVALID_CREDENTIAL",
            AppError::InvalidOrder(_) => "INVALID_ORDER",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::UnsupportedSymbol(_) => "UNSUPPORTED_SYMBOL",
            AppError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            AppError::InsufficientHoldings { .. } => "INSUFFICIENT_HOLDINGS",
            AppError::InvalidQuantity(_) => "INVALID_QUANTITY",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_codes() {
        let resp: ErrorResponse = AppError::DuplicateEmail("a@b.com".into()).into();
        assert_eq!(resp.code, "DUPLICATE_EMAIL");
        assert!(resp.message.contains("a@b.com"));

        let resp: ErrorResponse = AppError::InsufficientFunds {
            needed: 6000.0,
            available: 5000.0,
        }
        .into();
        assert_eq!(resp.code, "INSUFFICIENT_FUNDS");
    }
}
