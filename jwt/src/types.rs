//! Token type definitions

use serde::{Deserialize, Serialize};

use crate::error::JwtError;

/// Claims payload: an insertion-ordered JSON object.
///
/// Order is preserved through encoding because the signature covers the
/// exact serialized bytes; on decode the order carries no meaning.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Supported token algorithms.
///
/// `None` produces and accepts unsigned tokens and must be explicitly
/// allowed at every call site; it is never selected implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// HMAC with SHA-256 (symmetric key)
    #[serde(rename = "HS256")]
    HS256,
    /// Unsigned tokens with no integrity guarantee
    #[serde(rename = "none")]
    None,
}

impl Algorithm {
    /// The algorithm name as it appears in a token header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::None => "none",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            "none" => Ok(Algorithm::None),
            other => Err(JwtError::Config(format!("unsupported algorithm: {other}"))),
        }
    }
}

/// Token header structure
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Header {
    pub alg: &'static str,
    pub typ: &'static str,
}

impl Header {
    pub(crate) const fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.name(),
            typ: "JWT",
        }
    }
}
