//! Base64url segment encoding helpers (RFC 7515: URL-safe, no padding)

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}
