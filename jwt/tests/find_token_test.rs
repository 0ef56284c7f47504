//! Tests for token search and find-mode decoding

use serde_json::json;
use tokn_jwt::{create, decode, find_token, Algorithm, Claims, JwtError};

const KEY: &[u8] = b"secret";

fn claims() -> Claims {
    let mut map = Claims::new();
    map.insert("sub".to_string(), json!("alice"));
    map.insert("role".to_string(), json!("admin"));
    map
}

#[test]
fn test_decode_extracts_embedded_token() {
    let token = create(&claims(), Algorithm::HS256, Some(KEY), false).unwrap();
    let text = format!("Authorization: Bearer {token} (issued earlier today)");

    let decoded = decode(&text, Algorithm::HS256, Some(KEY), false, true).unwrap();
    assert_eq!(decoded, claims());
}

#[test]
fn test_decode_extracts_embedded_unsigned_token() {
    let token = create(&claims(), Algorithm::None, None, true).unwrap();
    let text = format!("<<{token}>>");

    let decoded = decode(&text, Algorithm::None, None, true, true).unwrap();
    assert_eq!(decoded, claims());
}

#[test]
fn test_find_mode_without_token_is_not_found() {
    let err = decode("no token anywhere", Algorithm::HS256, Some(KEY), false, true).unwrap_err();
    assert!(matches!(err, JwtError::NotFound), "got {err:?}");
}

#[test]
fn test_find_token_returns_first_match() {
    let first = create(&claims(), Algorithm::HS256, Some(KEY), false).unwrap();
    let second = create(&claims(), Algorithm::None, None, true).unwrap();
    let text = format!("{first} {second}");

    assert_eq!(find_token(&text), Some(first.as_str()));
}

#[test]
fn test_find_token_on_plain_text() {
    assert_eq!(find_token("nothing token-shaped"), None);
}

#[test]
fn test_embedded_token_must_still_verify() {
    let token = create(&claims(), Algorithm::HS256, Some(KEY), false).unwrap();
    let text = format!("Bearer {token}");

    let err = decode(
        &text,
        Algorithm::HS256,
        Some(b"different-key".as_slice()),
        false,
        true,
    )
    .unwrap_err();
    assert!(matches!(err, JwtError::SignatureVerification), "got {err:?}");
}
