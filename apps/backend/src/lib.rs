#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for public API
pub use auth::claims::{Claims, Identity, Role};
pub use auth::context::AuthContext;
pub use auth::jwt::{TokenCodec, TokenError, TOKEN_TTL};
pub use config::{Config, RuntimeEnv};
pub use error::AppError;
pub use middleware::{Authenticate, RequestTrace, RequireRole, StructuredLogger};
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
