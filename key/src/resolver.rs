//! Key material resolution
//!
//! Loads base64 key text from a validated local location and decodes it
//! into raw bytes. Every call re-reads the resource; nothing is cached.

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, Engine as _, GeneralPurposeConfig};
use zeroize::Zeroizing;

use crate::error::{KeyError, Result};
use crate::location::KeyLocation;

/// Standard-alphabet engine that accepts both padded and unpadded input.
/// Key files are commonly padded; environment variables often are not.
const KEY_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Resolve a key location string into raw key material.
///
/// The location is validated as local before any load attempt, the
/// resource text is read, and its base64 content is decoded. The returned
/// buffer is zeroized on drop.
///
/// # Errors
///
/// Returns [`KeyError::InvalidLocation`] for non-local locations,
/// [`KeyError::NotFound`] when the resource is missing or unreadable, and
/// [`KeyError::MalformedKey`] when its content is not valid base64.
pub fn resolve(location: &str) -> Result<Zeroizing<Vec<u8>>> {
    let parsed = KeyLocation::parse(location)?;
    let text = load_text(&parsed, location)?;

    // Key files routinely end in a newline; some are wrapped. Strip all
    // ASCII whitespace before decoding.
    let compact: String = text.split_ascii_whitespace().collect();

    let bytes = KEY_B64
        .decode(compact.as_bytes())
        .map_err(|source| KeyError::MalformedKey {
            location: location.to_string(),
            source,
        })?;

    tracing::debug!(location, len = bytes.len(), "resolved key material");

    Ok(Zeroizing::new(bytes))
}

fn load_text(parsed: &KeyLocation, location: &str) -> Result<Zeroizing<String>> {
    match parsed {
        KeyLocation::File(path) => std::fs::read_to_string(path)
            .map(Zeroizing::new)
            .map_err(|err| KeyError::NotFound {
                location: location.to_string(),
                source: Some(err),
            }),
        KeyLocation::Env(var) => std::env::var(var)
            .map(Zeroizing::new)
            .map_err(|_| KeyError::NotFound {
                location: location.to_string(),
                source: None,
            }),
    }
}
