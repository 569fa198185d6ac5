//! HS256 access token issuance and verification.
//!
//! Tokens are `base64url(header).base64url(claims).base64url(hmac)` with no
//! padding. Verification checks the MAC over the first two segments exactly
//! as received before it looks at the payload, and never inspects the
//! header.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::auth::claims::{Claims, Identity};
use crate::state::security_config::SecurityConfig;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of every issued token.
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    MalformedToken,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// Issues and verifies access tokens under a single secret.
///
/// Cheap to clone; the secret is shared behind an `Arc` and never mutated.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Arc<[u8]>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        Self::from_secret(security.jwt_secret.as_slice())
    }

    pub fn from_secret(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
        }
    }

    /// Issue a token for `identity` valid for [`TOKEN_TTL`] from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, SystemTime::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: SystemTime) -> Result<String, TokenError> {
        let claims = Claims {
            subject_id: identity.subject_id.clone(),
            email: identity.email.clone(),
            role: identity.role.clone(),
            expires_at: unix_seconds(now) + TOKEN_TTL.as_secs() as i64,
        };

        let header_json =
            serde_json::to_vec(&HEADER).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let claims_json =
            serde_json::to_vec(&claims).map_err(|e| TokenError::Encoding(e.to_string()))?;

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let signature = self
            .sign(message.as_bytes())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(format!("{message}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Verify `token` against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verify `token` as if the current time were `now`.
    ///
    /// Errors:
    /// - wrong segment count, empty segment, undecodable payload → `MalformedToken`
    /// - MAC mismatch (checked before the payload is read) → `BadSignature`
    /// - `exp < now` → `Expired`
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header_b64, payload_b64, signature_b64] = segments.as_slice() else {
            return Err(TokenError::MalformedToken);
        };
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(TokenError::MalformedToken);
        }

        // An undecodable signature can never match; report it the same way.
        let provided = URL_SAFE_NO_PAD.decode(signature_b64).unwrap_or_default();
        let signed_len = header_b64.len() + 1 + payload_b64.len();
        let expected = self
            .sign(token[..signed_len].as_bytes())
            .map_err(|_| TokenError::BadSignature)?;
        if !bool::from(expected.as_slice().ct_eq(&provided)) {
            return Err(TokenError::BadSignature);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::MalformedToken)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::MalformedToken)?;

        if claims.expires_at < unix_seconds(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, hmac::digest::InvalidLength> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Seconds since the Unix epoch; instants before the epoch clamp to zero.
fn unix_seconds(at: SystemTime) -> i64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
