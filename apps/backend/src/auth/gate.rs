//! Request gating decisions, independent of the HTTP framework.
//!
//! The actix middlewares in `crate::middleware` call into these functions;
//! keeping them here lets the decisions be tested without a server.

use std::time::SystemTime;

use crate::auth::context::AuthContext;
use crate::auth::jwt::TokenCodec;
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Kind of failure a gate turned a request away with (see
/// [`AppError::kind`]). The middlewares leave it in the request extensions
/// for the request logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection(pub &'static str);

impl From<&AppError> for Rejection {
    fn from(err: &AppError) -> Self {
        Rejection(err.kind())
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// Only `Bearer <token>` with exactly one space and a non-empty token is
/// accepted.
pub fn bearer_token(raw_header: Option<&str>) -> Result<&str, AppError> {
    let raw = match raw_header {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AppError::MissingCredential),
    };

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AppError::MalformedCredential)?;
    if token.is_empty() || token.contains(' ') {
        return Err(AppError::MalformedCredential);
    }

    Ok(token)
}

/// Authenticate a request from its raw `Authorization` header at `now`.
pub fn authenticate(
    codec: &TokenCodec,
    raw_header: Option<&str>,
    now: SystemTime,
) -> Result<AuthContext, AppError> {
    let token = bearer_token(raw_header)?;
    let claims = codec.verify_at(token, now)?;
    Ok(AuthContext::from(claims))
}

/// Check that an authenticated caller may act as `required`.
///
/// A request with no attached identity is forbidden.
pub fn check_role<'a>(
    context: Option<&'a AuthContext>,
    required: &str,
) -> Result<&'a AuthContext, AppError> {
    match context {
        Some(ctx) if ctx.satisfies_role(required) => Ok(ctx),
        _ => Err(AppError::Forbidden),
    }
}
