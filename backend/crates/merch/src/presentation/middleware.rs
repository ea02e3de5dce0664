//! Bearer Token Middleware
//!
//! Guards every route except `/auth`. On success the verified user name is
//! stored in request extensions as [`AuthenticatedUser`].

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::session_token::SessionTokenService;
use crate::domain::value_object::UserName;
use crate::error::{MerchError, MerchResult};

/// Authenticated caller, set by [`require_bearer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserName);

/// Middleware that requires a valid `Authorization: Bearer <token>` header
pub async fn require_bearer(
    State(tokens): State<SessionTokenService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, MerchError> {
    let token = bearer_token(req.headers())?;
    let user_name = tokens.verify(token)?;

    req.extensions_mut().insert(AuthenticatedUser(user_name));

    Ok(next.run(req).await)
}

/// Extract the token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> MerchResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(MerchError::MissingToken)?
        .to_str()
        .map_err(|_| MerchError::MalformedAuthorization)?;

    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("Bearer")
                && !token.is_empty()
                && !token.contains(' ') =>
        {
            Ok(token)
        }
        _ => Err(MerchError::MalformedAuthorization),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(MerchError::MissingToken)
        ));
    }

    #[test]
    fn test_malformed_header() {
        for value in ["abc", "Bearer", "Bearer ", "Basic abc", "Bearer a b"] {
            assert!(
                matches!(
                    bearer_token(&headers(value)),
                    Err(MerchError::MalformedAuthorization)
                ),
                "{value}"
            );
        }
    }
}
