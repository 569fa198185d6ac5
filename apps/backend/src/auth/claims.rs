//! Identity data carried inside access tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role tag that overrides every role check.
pub const ADMIN_ROLE: &str = "admin";

/// Identity handed to the codec by the caller. Already validated upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
    pub role: String,
}

impl Identity {
    pub fn new(
        subject_id: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Claims embedded in the token payload.
///
/// Field order matches the wire format: `user_id`, `email`, `role`, `exp`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Opaque identifier of the principal
    #[serde(rename = "user_id")]
    pub subject_id: String,
    pub email: String,
    pub role: String,
    /// Expiry (seconds since epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.subject_id, &self.email, &self.role)
    }
}

/// Known role tags. Tokens and gates compare plain strings; this enum is
/// for callers that want a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Developer,
    ProjectManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_ROLE,
            Role::Developer => "developer",
            Role::ProjectManager => "project_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "developer" => Ok(Role::Developer),
            "project_manager" => Ok(Role::ProjectManager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
