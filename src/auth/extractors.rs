use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{errors::AccessError, repo_types::User};

/// The user resolved by `require_auth`, available to downstream handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AccessError::Unauthenticated)
    }
}

/// Token from an `Authorization: Bearer <token>` header. Anything that is not
/// exactly a `Bearer` scheme followed by one non-empty token yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn accepts_exact_bearer_scheme() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        let malformed = [
            "abc",
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer a b",
            "Bearer  abc",
        ];
        for bad in malformed {
            assert_eq!(bearer_token(&headers(bad)), None, "{bad:?}");
        }
    }
}
