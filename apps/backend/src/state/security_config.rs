use tracing::warn;

use crate::config::app::RuntimeEnv;
use crate::error::AppError;

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

/// Secret used when `JWT_SECRET` is unset outside production. Anyone who
/// knows this value can mint tokens.
pub const FALLBACK_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Where the signing secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Environment,
    Fallback,
}

/// Configuration for JWT security settings
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    pub source: SecretSource,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            source: SecretSource::Environment,
        }
    }

    /// Resolve the signing secret from a configured value.
    ///
    /// A missing or empty secret is a startup error in production. Elsewhere
    /// the well-known fallback is used and a warning is logged.
    pub fn resolve(configured: Option<String>, env: RuntimeEnv) -> Result<Self, AppError> {
        match configured.filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Self::new(secret)),
            None if env == RuntimeEnv::Prod => Err(AppError::config(format!(
                "{JWT_SECRET_VAR} must be set when running in production"
            ))),
            None => {
                warn!(
                    env_var = JWT_SECRET_VAR,
                    "signing secret not configured; using the insecure built-in fallback"
                );
                Ok(Self {
                    jwt_secret: FALLBACK_JWT_SECRET.as_bytes().to_vec(),
                    source: SecretSource::Fallback,
                })
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SecretSource::Fallback
    }
}
