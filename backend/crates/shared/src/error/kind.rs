//! Error Kind - HTTP status classification
//!
//! Every failure the shop reports falls into one of these kinds. Clients
//! only rely on the status class: 4xx can be fixed by changing the request,
//! 5xx means nothing was committed.

use serde::Serialize;

/// エラー種別
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert!(kind.is_client_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400: malformed input or a refused business rule (e.g. insufficient funds)
    BadRequest,
    /// 401: credentials or bearer token rejected
    Unauthorized,
    /// 404: unknown user or item
    NotFound,
    /// 409: the resource already exists
    Conflict,
    /// 500
    InternalServerError,
    /// 503: aborted by a concurrent writer, retrying may succeed
    ServiceUnavailable,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Reason phrase, used in log output
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// サーバー側のエラー（error レベルでログ出力）
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    #[inline]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }

    /// Whether the same request may succeed later
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::ServiceUnavailable)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 6] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    #[test]
    fn test_status_codes() {
        let codes: Vec<u16> = ALL.iter().map(ErrorKind::status_code).collect();
        assert_eq!(codes, vec![400, 401, 404, 409, 500, 503]);
    }

    #[test]
    fn test_every_kind_has_exactly_one_class() {
        for kind in ALL {
            assert_ne!(kind.is_client_error(), kind.is_server_error(), "{kind}");
        }
    }

    #[test]
    fn test_only_unavailable_is_transient() {
        let transient: Vec<_> = ALL.into_iter().filter(ErrorKind::is_transient).collect();
        assert_eq!(transient, vec![ErrorKind::ServiceUnavailable]);
    }

    #[test]
    fn test_serialize_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ServiceUnavailable).unwrap();
        assert_eq!(json, r#""SERVICE_UNAVAILABLE""#);
    }
}
