//! Device token authentication for learner routes

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Device resolved from the bearer token, stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedDevice {
    pub device_id: Uuid,
    pub token: String,
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))
}

/// Reject requests without a registered device token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(request.headers())?.to_string();

    let device = state
        .db
        .get_device_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid device token".to_string()))?;

    state.db.update_last_seen(device.id).await?;
    tracing::debug!(device_id = %device.id, path = %request.uri().path(), "authenticated");

    request.extensions_mut().insert(AuthenticatedDevice {
        device_id: device.id,
        token,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc-123")).unwrap(), "abc-123");
    }

    #[test]
    fn test_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Missing Authorization header");
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        assert!(matches!(
            bearer_token(&headers("Basic abc")),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&headers("Bearer  ")),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
