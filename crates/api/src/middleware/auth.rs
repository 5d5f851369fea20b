//! # Authentication Module
//!
//! Identity is owned by an external provider. Mutating endpoints only
//! require that the caller presents a bearer token issued by it; the
//! caller's id is read from the `X-User-Id` header set by the gateway and
//! is recorded in the surgery audit trail.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use otsched_core::errors::OtError;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ANONYMOUS_USER: &str = "unknown";

/// The authenticated caller of a mutating endpoint.
///
/// # Example
///
/// ```ignore
/// async fn handler(user: AuthUser, Json(body): Json<DoctorRequest>) -> ... {
///     tracing::info!("request by {}", user.user_id);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Returns the token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if bearer_token(&parts.headers).is_none() {
            return Err(AppError(OtError::Authentication(
                "Missing or malformed bearer token".to_string(),
            )));
        }

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(ANONYMOUS_USER)
            .to_string();

        Ok(AuthUser { user_id })
    }
}
