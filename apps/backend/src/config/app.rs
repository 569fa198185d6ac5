//! Application configuration loaded from environment variables.
//!
//! Variables must be provided by the runtime environment (container env
//! file, shell export). Nothing is read from disk.

use std::env;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, JWT_SECRET_VAR};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Deployment environment. Production refuses to start with the fallback
/// signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Dev,
}

impl RuntimeEnv {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("prod") => RuntimeEnv::Prod,
            _ => RuntimeEnv::Dev,
        }
    }
}

/// Application configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    pub runtime_env: RuntimeEnv,

    // Security configuration
    pub security: SecurityConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime_env = RuntimeEnv::parse(lookup("RUNTIME_ENV").as_deref());

        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        // BACKEND_PORT wins; plain PORT is honoured for platforms that set it.
        let port = match ["BACKEND_PORT", "PORT"]
            .into_iter()
            .find_map(|name| lookup(name).filter(|p| !p.is_empty()).map(|raw| (name, raw)))
        {
            Some((name, raw)) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("{name} must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let security = SecurityConfig::resolve(lookup(JWT_SECRET_VAR), runtime_env)?;

        Ok(Config {
            host,
            port,
            runtime_env,
            security,
        })
    }
}
