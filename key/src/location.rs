//! Key location grammar and locality checks
//!
//! A key location must carry an explicit scheme so that it can never be
//! mistaken for inline key material. Only local, non-network schemes are
//! accepted; anything HTTP-shaped is refused before a single byte of I/O.

use std::path::PathBuf;

use crate::error::{KeyError, Result};

/// A parsed, validated key location.
///
/// Parsing succeeds only for local, non-network locations; see
/// [`KeyLocation::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLocation {
    /// A file on the local filesystem (`file:/path/to/key`)
    File(PathBuf),
    /// A process environment variable holding the key text (`env:VAR_NAME`)
    Env(String),
}

impl KeyLocation {
    /// Parse a location string into a validated local location.
    ///
    /// Recognized schemes are `file:` and `env:`. HTTP and HTTPS locations
    /// are refused outright, as is any location without a recognized
    /// scheme. This check runs before any load attempt.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidLocation`] for network schemes,
    /// unrecognized schemes, scheme-less strings and empty remainders.
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();

        let invalid = |reason: &'static str| KeyError::InvalidLocation {
            location: location.to_string(),
            reason,
        };

        if has_scheme(location, "http") || has_scheme(location, "https") {
            return Err(invalid("network locations are not allowed"));
        }

        if let Some(path) = strip_scheme(location, "file") {
            if path.is_empty() {
                return Err(invalid("file location is missing a path"));
            }
            return Ok(KeyLocation::File(PathBuf::from(path)));
        }

        if let Some(var) = strip_scheme(location, "env") {
            if var.is_empty() {
                return Err(invalid("env location is missing a variable name"));
            }
            return Ok(KeyLocation::Env(var.to_string()));
        }

        Err(invalid("must use a recognized local scheme (file: or env:)"))
    }
}

impl std::str::FromStr for KeyLocation {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        KeyLocation::parse(s)
    }
}

/// Whether a location string refers to a local, non-network resource.
///
/// Pure predicate over the location text; performs no I/O. Suitable for
/// validating configuration up front, before any resolution happens.
#[must_use]
pub fn is_local(location: &str) -> bool {
    KeyLocation::parse(location).is_ok()
}

fn has_scheme(location: &str, scheme: &str) -> bool {
    strip_scheme(location, scheme).is_some()
}

/// Case-insensitive scheme match; returns the remainder after the colon.
fn strip_scheme<'a>(location: &'a str, scheme: &str) -> Option<&'a str> {
    let head = location.get(..scheme.len())?;
    if !head.eq_ignore_ascii_case(scheme) {
        return None;
    }
    location[scheme.len()..]
        .strip_prefix(':')
        .map(|rest| rest.strip_prefix("//").unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_locations_refused() {
        assert!(!is_local("http://example.com/key"));
        assert!(!is_local("https://example.com/key"));
        assert!(!is_local("HTTP://example.com/key"));
        assert!(!is_local("HtTpS://example.com/key"));
    }

    #[test]
    fn test_local_schemes_accepted() {
        assert!(is_local("file:/etc/tokn/key.b64"));
        assert!(is_local("file:///etc/tokn/key.b64"));
        assert!(is_local("env:TOKN_KEY"));
    }

    #[test]
    fn test_schemeless_and_unknown_refused() {
        assert!(!is_local("/etc/tokn/key.b64"));
        assert!(!is_local("key.b64"));
        assert!(!is_local("ftp://example.com/key"));
        assert!(!is_local(""));
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            KeyLocation::parse("file:/tmp/k").ok(),
            Some(KeyLocation::File(PathBuf::from("/tmp/k")))
        );
        assert_eq!(
            KeyLocation::parse("file:///tmp/k").ok(),
            Some(KeyLocation::File(PathBuf::from("/tmp/k")))
        );
        assert_eq!(
            KeyLocation::parse("env:SECRET").ok(),
            Some(KeyLocation::Env("SECRET".to_string()))
        );
    }

    #[test]
    fn test_empty_remainders_refused() {
        assert!(KeyLocation::parse("file:").is_err());
        assert!(KeyLocation::parse("env:").is_err());
    }

    #[test]
    fn test_https_not_mistaken_for_http_prefix() {
        // "https" must not be matched as scheme "http" with remainder "s…"
        assert!(!is_local("https:local-looking-path"));
    }
}
