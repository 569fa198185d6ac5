//! Token helpers for tests

use std::time::{Duration, SystemTime};

use pm_backend::{Identity, TokenCodec};

/// Codec keyed with `secret`.
pub fn test_codec(secret: &str) -> TokenCodec {
    TokenCodec::from_secret(secret)
}

/// Issue a token for the given identity, valid from now.
pub fn mint_test_token(codec: &TokenCodec, user_id: &str, email: &str, role: &str) -> String {
    codec
        .issue(&Identity::new(user_id, email, role))
        .expect("should issue token successfully")
}

/// Full `Authorization` header value including the `Bearer ` prefix.
pub fn bearer_header(codec: &TokenCodec, user_id: &str, email: &str, role: &str) -> String {
    format!("Bearer {}", mint_test_token(codec, user_id, email, role))
}

/// Issue a token whose 24 hour lifetime ended an hour ago.
pub fn mint_expired_token(codec: &TokenCodec, user_id: &str, email: &str, role: &str) -> String {
    let issued_at = SystemTime::now() - Duration::from_secs(25 * 60 * 60);
    codec
        .issue_at(&Identity::new(user_id, email, role), issued_at)
        .expect("should issue expired token successfully")
}
