//! Error conversions
//!
//! Classification of database failures and the HTTP rendering of
//! [`AppError`]. Both are feature-gated so the kernel stays usable without
//! sqlx or axum.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database failure by its effect on the client
///
/// Serialization failures, deadlocks and an exhausted or unreachable pool
/// leave nothing committed and are worth retrying (503). Everything else
/// is a server fault (500). Constraint violations are not inspected here:
/// stores translate the ones they expect into domain errors first.
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => ErrorKind::ServiceUnavailable,
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 40: Transaction Rollback
            Some("40001" | "40P01") => ErrorKind::ServiceUnavailable,
            // Class 53 / 57: Insufficient Resources, Operator Intervention
            Some("53300" | "57P01" | "57P03") => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let app_err = match sqlx_error_kind(&err) {
            ErrorKind::ServiceUnavailable => {
                AppError::service_unavailable("concurrent update, please retry")
            }
            _ => AppError::internal("internal server error"),
        };
        app_err.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// Renders `{"errors": "<message>"}` with the kind's status code
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "errors": self.payload_text() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_classification() {
        use super::*;

        assert_eq!(
            sqlx_error_kind(&sqlx::Error::PoolTimedOut),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            sqlx_error_kind(&sqlx::Error::RowNotFound),
            ErrorKind::InternalServerError
        );

        let app_err: AppError = sqlx::Error::Protocol("unexpected message".into()).into();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.payload_text().contains("unexpected message"));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_response_body_shape() {
        use super::AppError;
        use axum::response::IntoResponse;

        let response = AppError::bad_request("insufficient funds").into_response();
        assert_eq!(response.status(), 400);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "errors": "insufficient funds" }));
    }
}
