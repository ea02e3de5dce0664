//! Merch Error Types
//!
//! Shop-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

/// Merch-specific result type alias
pub type MerchResult<T> = Result<T, MerchError>;

/// Merch-specific error variants
#[derive(Debug, Error)]
pub enum MerchError {
    /// Missing or malformed request input
    #[error("{0}")]
    InvalidInput(String),

    /// Transfer amount is zero, negative or out of range
    #[error("amount must be a positive number of coins")]
    InvalidAmount,

    /// Sender and recipient are the same account
    #[error("cannot send coins to yourself")]
    SelfTransfer,

    /// Unknown account
    #[error("user not found")]
    UserNotFound,

    /// Unknown merch item
    #[error("item not found")]
    ItemNotFound,

    /// Guarded decrement refused: balance is lower than the amount
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Credit would exceed the representable balance
    #[error("balance limit exceeded")]
    BalanceOverflow,

    /// Account row already exists (lost a registration race)
    #[error("user already exists")]
    UserAlreadyExists,

    /// Registration race could not be resolved by re-reading the account
    #[error("account registration is in progress")]
    RegistrationConflict,

    /// Password does not match the stored hash
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No Authorization header on a protected route
    #[error("missing authorization header")]
    MissingToken,

    /// Authorization header is not `Bearer <token>`
    #[error("invalid authorization header format")]
    MalformedAuthorization,

    /// Bad signature, expired, or missing subject
    #[error("invalid token")]
    InvalidToken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MerchError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MerchError::InvalidInput(_)
            | MerchError::InvalidAmount
            | MerchError::SelfTransfer
            | MerchError::InsufficientFunds
            | MerchError::BalanceOverflow => ErrorKind::BadRequest,
            MerchError::UserNotFound | MerchError::ItemNotFound => ErrorKind::NotFound,
            MerchError::UserAlreadyExists => ErrorKind::Conflict,
            MerchError::RegistrationConflict => ErrorKind::ServiceUnavailable,
            MerchError::InvalidCredentials
            | MerchError::MissingToken
            | MerchError::MalformedAuthorization
            | MerchError::InvalidToken => ErrorKind::Unauthorized,
            MerchError::Database(e) => sqlx_error_kind(e),
            MerchError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server faults carry a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            MerchError::Database(e) if sqlx_error_kind(e).is_transient() => {
                AppError::service_unavailable("concurrent update, please retry")
            }
            MerchError::Database(_) | MerchError::Internal(_) => {
                AppError::internal("internal server error")
            }
            MerchError::RegistrationConflict => AppError::service_unavailable(self.to_string())
                .with_action("retry the authentication request"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MerchError::Database(e) => {
                tracing::error!(error = %e, "Merch database error");
            }
            MerchError::Internal(msg) => {
                tracing::error!(message = %msg, "Merch internal error");
            }
            MerchError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            MerchError::InvalidToken | MerchError::MalformedAuthorization => {
                tracing::warn!(error = %self, "Rejected bearer token");
            }
            MerchError::RegistrationConflict => {
                tracing::warn!("Unresolved registration race");
            }
            _ => {
                tracing::debug!(error = %self, "Merch error");
            }
        }
    }
}

impl IntoResponse for MerchError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<MerchError> for AppError {
    fn from(err: MerchError) -> Self {
        err.to_app_error()
    }
}

impl From<tokio::task::JoinError> for MerchError {
    fn from(err: tokio::task::JoinError) -> Self {
        MerchError::Internal(format!("blocking task failed: {err}"))
    }
}

impl From<platform::password::PasswordHashError> for MerchError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        MerchError::Internal(err.to_string())
    }
}
