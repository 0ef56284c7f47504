//! Compact token encoding and verification
//!
//! The algorithm is bound at both call sites. A token's declared `alg`
//! header is only ever compared against the caller's choice; it never
//! selects the verification algorithm, so a forged header cannot redirect
//! verification to a weaker algorithm.

use serde_json::Value;

use crate::crypto::{sign_hs256, verify_hs256};
use crate::encoding::{base64_url_decode, base64_url_encode};
use crate::error::{JwtError, Result};
use crate::find::find_token;
use crate::types::{Algorithm, Claims, Header};

/// Encode a claims object into a compact token.
///
/// With [`Algorithm::HS256`] a non-empty `key` is required and the token
/// carries an HMAC-SHA256 signature over `header.payload`. With
/// [`Algorithm::None`] the token is unsigned: the signature segment is
/// empty but the trailing dot is retained (`header.payload.`), and the
/// call is refused unless `allow_none` is set.
///
/// # Errors
///
/// Returns [`JwtError::Config`] for a disallowed algorithm or a missing
/// key, and [`JwtError::Serialization`] if the claims cannot be
/// serialized.
pub fn create(
    claims: &Claims,
    algorithm: Algorithm,
    key: Option<&[u8]>,
    allow_none: bool,
) -> Result<String> {
    let key = required_key(algorithm, key, allow_none)?;

    let header_json = serde_json::to_string(&Header::new(algorithm))
        .map_err(|e| JwtError::Serialization(e.to_string()))?;
    let payload_json =
        serde_json::to_string(claims).map_err(|e| JwtError::Serialization(e.to_string()))?;

    let header_seg = base64_url_encode(header_json.as_bytes());
    let payload_seg = base64_url_encode(payload_json.as_bytes());
    let signing_input = format!("{header_seg}.{payload_seg}");

    match algorithm {
        Algorithm::HS256 => {
            // required_key guarantees a key for HS256
            let key = key.ok_or_else(|| JwtError::config("no signing key provided"))?;
            let signature = sign_hs256(&signing_input, key)?;
            Ok(format!("{signing_input}.{}", base64_url_encode(&signature)))
        }
        Algorithm::None => Ok(format!("{signing_input}.")),
    }
}

/// Verify a compact token and decode its claims.
///
/// With `find_token` set, the first token-shaped substring of `input` is
/// used; otherwise the whole trimmed input must be a token. The token's
/// declared algorithm must equal `algorithm`, and the signature (HS256) or
/// the empty-signature framing (`none`) is checked before the payload is
/// returned.
///
/// # Errors
///
/// Returns [`JwtError::NotFound`] when find mode matches nothing,
/// [`JwtError::MalformedToken`] for structural problems,
/// [`JwtError::AlgorithmMismatch`] when the header disagrees with the
/// caller, [`JwtError::Config`] for a disallowed algorithm or missing key,
/// and [`JwtError::SignatureVerification`] when the HMAC does not match.
pub fn decode(
    input: &str,
    algorithm: Algorithm,
    key: Option<&[u8]>,
    allow_none: bool,
    find: bool,
) -> Result<Claims> {
    let token = if find {
        find_token(input).ok_or(JwtError::NotFound)?
    } else {
        input.trim()
    };

    let parts: Vec<&str> = token.split('.').collect();
    let [header_seg, payload_seg, signature_seg] = parts[..] else {
        return Err(JwtError::malformed("expected three dot-separated segments"));
    };

    let declared = declared_algorithm(header_seg)?;
    if declared != algorithm.name() {
        return Err(JwtError::AlgorithmMismatch {
            expected: algorithm.name(),
            found: declared,
        });
    }

    let key = required_key(algorithm, key, allow_none)?;

    match algorithm {
        Algorithm::HS256 => {
            let key = key.ok_or_else(|| JwtError::config("no verification key provided"))?;
            let signature = base64_url_decode(signature_seg)
                .map_err(|_| JwtError::malformed("invalid signature encoding"))?;
            let signing_input = format!("{header_seg}.{payload_seg}");
            if !verify_hs256(&signing_input, &signature, key)? {
                return Err(JwtError::SignatureVerification);
            }
        }
        Algorithm::None => {
            if !signature_seg.is_empty() {
                return Err(JwtError::malformed(
                    "unsigned token must have an empty signature segment",
                ));
            }
        }
    }

    let payload_bytes = base64_url_decode(payload_seg)
        .map_err(|_| JwtError::malformed("invalid payload encoding"))?;
    let payload: Value = serde_json::from_slice(&payload_bytes)
        .map_err(|_| JwtError::malformed("invalid payload JSON"))?;

    match payload {
        Value::Object(claims) => Ok(claims),
        _ => Err(JwtError::malformed("claims payload must be a JSON object")),
    }
}

/// Read the `alg` the token header declares, without trusting it for
/// anything beyond mismatch detection.
fn declared_algorithm(header_seg: &str) -> Result<String> {
    let header_bytes =
        base64_url_decode(header_seg).map_err(|_| JwtError::malformed("invalid header encoding"))?;
    let header: Value = serde_json::from_slice(&header_bytes)
        .map_err(|_| JwtError::malformed("invalid header JSON"))?;

    header
        .get("alg")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| JwtError::malformed("header does not declare an algorithm"))
}

/// Enforce the key/algorithm contract shared by create and decode:
/// `none` only with explicit opt-in and never with a key; HS256 only with
/// a non-empty key.
fn required_key<'k>(
    algorithm: Algorithm,
    key: Option<&'k [u8]>,
    allow_none: bool,
) -> Result<Option<&'k [u8]>> {
    match algorithm {
        Algorithm::None => {
            if !allow_none {
                return Err(JwtError::config(
                    "algorithm \"none\" is not allowed; set allow_none to true to use it",
                ));
            }
            Ok(None)
        }
        Algorithm::HS256 => match key {
            Some(k) if !k.is_empty() => Ok(Some(k)),
            _ => Err(JwtError::config("HS256 requires a non-empty key")),
        },
    }
}
