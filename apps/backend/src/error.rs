use actix_web::error::ResponseError;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::auth::jwt::TokenError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MissingCredential")]
    MissingCredential,
    #[error("MalformedCredential")]
    MalformedCredential,
    /// Token rejected by the codec. The reason is for logs only.
    #[error("Unauthorized: {0}")]
    Unauthorized(#[source] TokenError),
    #[error("Forbidden")]
    Forbidden,
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Text written to the response body. Codec failures all share one
    /// message so callers cannot tell them apart.
    fn detail(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "Authorization header required",
            AppError::MalformedCredential => "Invalid authorization header",
            AppError::Unauthorized(_) => "Invalid token",
            AppError::Forbidden => "Insufficient permissions",
            AppError::Config { .. } => "Internal server error",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::MalformedCredential => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable tag for logs. Token failures are split by the
    /// codec's reason.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "missing_credential",
            AppError::MalformedCredential => "malformed_credential",
            AppError::Unauthorized(TokenError::MalformedToken) => "malformed_token",
            AppError::Unauthorized(TokenError::BadSignature) => "bad_signature",
            AppError::Unauthorized(TokenError::Expired) => "expired",
            AppError::Unauthorized(TokenError::Encoding(_)) => "encoding",
            AppError::Forbidden => "forbidden",
            AppError::Config { .. } => "config",
        }
    }

    /// The codec's reason for rejecting a token, if that is what happened.
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            AppError::Unauthorized(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::Unauthorized(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let mut builder = HttpResponse::build(status);
        builder.insert_header(ContentType::plaintext());

        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }

        builder.body(self.detail())
    }
}
