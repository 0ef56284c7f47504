//! HMAC-SHA256 signing primitives

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::JwtError;

type HmacSha256 = Hmac<Sha256>;

/// Sign the signing input with HMAC-SHA256 (HS256).
pub(crate) fn sign_hs256(message: &str, key: &[u8]) -> Result<Vec<u8>, JwtError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| JwtError::Config("HMAC key was rejected".to_string()))?;
    mac.update(message.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify an HS256 signature by recomputing it over the signing input.
/// Comparison is constant-time.
pub(crate) fn verify_hs256(message: &str, signature: &[u8], key: &[u8]) -> Result<bool, JwtError> {
    let expected = sign_hs256(message, key)?;
    Ok(constant_time_eq(signature, &expected))
}

/// Constant-time comparison; also false on length mismatch.
#[must_use]
#[inline]
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}
