//! Assertions for rejections written by the authentication gates.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;

/// Assert that `resp` is a plain-text rejection with the given status and
/// exact body.
///
/// 401 responses must carry `WWW-Authenticate: Bearer`; other statuses must
/// not.
pub async fn assert_rejection(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_body: &str,
) {
    assert_eq!(resp.status(), expected_status);

    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("text/plain"),
        "Content-Type must be text/plain (got {content_type})"
    );

    let challenge = headers.get(WWW_AUTHENTICATE).and_then(|v| v.to_str().ok());
    if expected_status == StatusCode::UNAUTHORIZED {
        assert_eq!(challenge, Some("Bearer"));
    } else {
        assert_eq!(challenge, None);
    }

    let body = actix_web::test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).expect("rejection body should be UTF-8");
    assert_eq!(body, expected_body);
}

/// 401 with the single message every token failure shares.
pub async fn assert_invalid_token(resp: ServiceResponse<BoxBody>) {
    assert_rejection(resp, StatusCode::UNAUTHORIZED, "Invalid token").await;
}

/// 403 from a failed role check.
pub async fn assert_forbidden(resp: ServiceResponse<BoxBody>) {
    assert_rejection(resp, StatusCode::FORBIDDEN, "Insufficient permissions").await;
}
