use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Subject (email) of a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

/// Second whitespace-separated segment of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .split_whitespace()
        .nth(1)
}

/// No token is 401; a token that fails verification for any reason is 403.
pub fn authorize(keys: &JwtKeys, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    match keys.verify(token) {
        Ok(claims) => Ok(AuthUser(claims.sub)),
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            Err(ApiError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        let keys = JwtKeys::from_ref(state);
        authorize(&keys, &parts.headers)
    }
}

/// Route layer form of the gate: rejects before the handler runs and leaves
/// the subject in the request extensions.
pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authorize(&keys, req.headers())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::HeaderValue;
    use time::{Duration, OffsetDateTime};

    fn keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::for_tests(true))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = authorize(&keys(), &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn header_without_second_segment_counts_as_missing() {
        let err = authorize(&keys(), &headers("Bearer")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn valid_token_is_admitted_with_subject() {
        let keys = keys();
        let token = keys.sign("a@x.com").unwrap();
        let user = authorize(&keys, &headers(&format!("Bearer {token}"))).unwrap();
        assert_eq!(user, AuthUser("a@x.com".into()));
    }

    #[test]
    fn expired_and_malformed_tokens_are_rejected_alike() {
        let keys = keys();
        let expired = keys
            .sign_issued_at("a@x.com", OffsetDateTime::now_utc() - Duration::hours(2))
            .unwrap();

        let a = authorize(&keys, &headers(&format!("Bearer {expired}"))).unwrap_err();
        let b = authorize(&keys, &headers("Bearer garbage")).unwrap_err();
        assert!(matches!(a, ApiError::Forbidden));
        assert!(matches!(b, ApiError::Forbidden));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[tokio::test]
    async fn extractor_prefers_subject_left_by_middleware() {
        let state = AppState::for_tests(true);
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/siswa")
            .body(())
            .unwrap()
            .into_parts();
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        parts.extensions.insert(AuthUser("a@x.com".into()));
        let user = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.0, "a@x.com");
    }
}
