use std::time::{Duration, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use pm_backend::{Identity, TokenError, TOKEN_TTL};

use crate::common::TEST_SECRET;
use crate::support::auth::{mint_expired_token, test_codec};

fn identity() -> Identity {
    Identity::new("u1", "a@b.com", "developer")
}

#[test]
fn roundtrip_holds_across_whole_lifetime() {
    let codec = test_codec(TEST_SECRET);
    let issued_at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let token = codec.issue_at(&identity(), issued_at).unwrap();

    for offset in [0, 1, 60 * 60, 12 * 60 * 60, TOKEN_TTL.as_secs()] {
        let claims = codec
            .verify_at(&token, issued_at + Duration::from_secs(offset))
            .unwrap();
        assert_eq!(claims.identity(), identity(), "offset {offset}");
        assert_eq!(claims.expires_at, 1_700_000_000 + TOKEN_TTL.as_secs() as i64);
    }
}

#[test]
fn one_second_past_expiry_is_rejected() {
    let codec = test_codec(TEST_SECRET);
    let issued_at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let token = codec.issue_at(&identity(), issued_at).unwrap();

    let result = codec.verify_at(&token, issued_at + TOKEN_TTL + Duration::from_secs(1));

    assert_eq!(result, Err(TokenError::Expired));
}

#[test]
fn expired_token_against_wall_clock() {
    let codec = test_codec(TEST_SECRET);
    let token = mint_expired_token(&codec, "u1", "a@b.com", "developer");

    assert_eq!(codec.verify(&token), Err(TokenError::Expired));
}

#[test]
fn tokens_do_not_verify_under_another_secret() {
    let token = test_codec("K1").issue(&identity()).unwrap();

    assert_eq!(test_codec("K2").verify(&token), Err(TokenError::BadSignature));
}

#[test]
fn payload_bit_flip_is_bad_signature() {
    let codec = test_codec(TEST_SECRET);
    let token = codec.issue(&identity()).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let mut payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
    // Flip the low bit of the role's first letter: "developer" -> "eeveloper".
    let idx = payload
        .windows(b"developer".len())
        .position(|w| w == b"developer")
        .unwrap();
    payload[idx] ^= 0x01;
    let forged = format!(
        "{}.{}.{}",
        parts[0],
        URL_SAFE_NO_PAD.encode(&payload),
        parts[2]
    );

    assert_eq!(codec.verify(&forged), Err(TokenError::BadSignature));
}

#[test]
fn swapped_payload_from_another_token_is_bad_signature() {
    let codec = test_codec(TEST_SECRET);
    let dev = codec.issue(&identity()).unwrap();
    let admin = codec
        .issue(&Identity::new("u1", "a@b.com", "admin"))
        .unwrap();

    let dev_parts: Vec<&str> = dev.split('.').collect();
    let admin_parts: Vec<&str> = admin.split('.').collect();
    let spliced = format!("{}.{}.{}", dev_parts[0], admin_parts[1], dev_parts[2]);

    assert_eq!(codec.verify(&spliced), Err(TokenError::BadSignature));
}

#[test]
fn appended_character_is_bad_signature() {
    let codec = test_codec(TEST_SECRET);
    let token = codec.issue(&identity()).unwrap();

    assert_eq!(
        codec.verify(&format!("{token}x")),
        Err(TokenError::BadSignature)
    );
}

#[test]
fn wrong_segment_counts_are_malformed() {
    let codec = test_codec(TEST_SECRET);

    for bad in ["", "a", "a.b", "a.b.c.d", "..", "a..c", "not-a-real-token"] {
        assert_eq!(
            codec.verify(bad),
            Err(TokenError::MalformedToken),
            "input: {bad:?}"
        );
    }
}

#[test]
fn concurrent_issue_and_verify() {
    let codec = test_codec(TEST_SECRET);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let codec = codec.clone();
            std::thread::spawn(move || {
                let id = Identity::new(format!("user-{i}"), "a@b.com", "developer");
                for _ in 0..50 {
                    let token = codec.issue(&id).unwrap();
                    assert_eq!(codec.verify(&token).unwrap().identity(), id);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
