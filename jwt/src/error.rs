//! Error handling for token operations

use thiserror::Error;
use tokn_key::KeyError;

/// Token operation result type
pub type Result<T> = std::result::Result<T, JwtError>;

/// Token operation errors
#[derive(Debug, Error)]
pub enum JwtError {
    /// Invalid or disallowed operation configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Token declares a different algorithm than the caller expects
    #[error("token algorithm {found:?} does not match expected {expected:?}")]
    AlgorithmMismatch {
        /// Algorithm the caller bound at the call site
        expected: &'static str,
        /// Algorithm declared by the token header
        found: String,
    },

    /// HMAC signature did not verify
    #[error("token signature verification failed")]
    SignatureVerification,

    /// Token structure, segment encoding or JSON content is invalid
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// No token-shaped substring found in the input
    #[error("no token found in input")]
    NotFound,

    /// Configured source field is absent from the message
    #[error("no input found at {0:?}")]
    MissingInput(String),

    /// Key material could not be resolved
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Header or claims serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        JwtError::MalformedToken(msg.to_string())
    }

    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn config(msg: &str) -> Self {
        JwtError::Config(msg.to_string())
    }
}
