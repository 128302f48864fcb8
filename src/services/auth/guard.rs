//! Bearer-token guard for protected routes.
//!
//! Pure function over the request headers: no I/O, no shared mutable state.
//! Rejections are reported with their specific reason so callers can log
//! it, but they all collapse into one 401 at the HTTP boundary.

use axum::http::{HeaderMap, HeaderValue, header};

use super::token::TokenService;
use super::{AuthError, Principal};

const BEARER: &str = "Bearer";

/// Authenticate a request from its `Authorization` header.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<Principal, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let token = bearer_token(value)?;

    tokens.verify(token)
}

/// Extract `<token>` from a `Bearer <token>` header value.
///
/// The scheme is case-insensitive; the token must be non-empty and free of whitespace.
pub fn bearer_token(value: &HeaderValue) -> Result<&str, AuthError> {
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedCredentials)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MalformedCredentials)?;

    if !scheme.eq_ignore_ascii_case(BEARER)
        || token.is_empty()
        || token.contains(char::is_whitespace)
    {
        return Err(AuthError::MalformedCredentials);
    }

    Ok(token)
}
