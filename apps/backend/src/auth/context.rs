//! Verified identity attached to a request.

use serde::{Deserialize, Serialize};

use crate::auth::claims::{Claims, ADMIN_ROLE};

/// Identity of the caller, inserted into request extensions by the
/// `Authenticate` middleware once its token has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    #[serde(rename = "user_id")]
    pub subject_id: String,
    pub email: String,
    pub role: String,
}

impl AuthContext {
    /// True when the caller holds `required` or is an admin.
    pub fn satisfies_role(&self, required: &str) -> bool {
        self.role == required || self.role == ADMIN_ROLE
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.subject_id,
            email: claims.email,
            role: claims.role,
        }
    }
}
