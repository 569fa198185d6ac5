//! Wire compatibility with a general-purpose JWT implementation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pm_backend::{Claims, Identity, TokenError};

use crate::common::TEST_SECRET;
use crate::support::auth::test_codec;

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[test]
fn issued_tokens_decode_as_standard_hs256() {
    let token = test_codec(TEST_SECRET)
        .issue(&Identity::new("u1", "a@b.com", "developer"))
        .unwrap();

    let data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();

    assert_eq!(data.header.alg, Algorithm::HS256);
    assert_eq!(data.header.typ.as_deref(), Some("JWT"));
    assert_eq!(data.claims.subject_id, "u1");
    assert_eq!(data.claims.role, "developer");
}

#[test]
fn externally_minted_tokens_verify() {
    let claims = Claims {
        subject_id: "u7".to_string(),
        email: "x@y.z".to_string(),
        role: "admin".to_string(),
        expires_at: now_secs() + 3600,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(test_codec(TEST_SECRET).verify(&token), Ok(claims));
}

#[test]
fn externally_minted_tokens_under_other_key_fail() {
    let claims = Claims {
        subject_id: "u7".to_string(),
        email: "x@y.z".to_string(),
        role: "admin".to_string(),
        expires_at: now_secs() + 3600,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"someone-elses-key"),
    )
    .unwrap();

    assert_eq!(
        test_codec(TEST_SECRET).verify(&token),
        Err(TokenError::BadSignature)
    );
}
