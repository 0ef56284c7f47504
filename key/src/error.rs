//! Error handling for key resolution

use thiserror::Error;

/// Key resolution result type
pub type Result<T> = std::result::Result<T, KeyError>;

/// Key resolution errors
#[derive(Debug, Error)]
pub enum KeyError {
    /// Location is network-addressed or carries no recognized local scheme
    #[error("invalid key location {location:?}: {reason}")]
    InvalidLocation {
        /// The offending location string
        location: String,
        /// Why the location was refused
        reason: &'static str,
    },

    /// Key resource missing or unreadable
    #[error("key resource {location:?} could not be read")]
    NotFound {
        /// The location that failed to load
        location: String,
        /// Underlying I/O error, if there was one
        #[source]
        source: Option<std::io::Error>,
    },

    /// Key resource content is not valid base64
    #[error("key resource {location:?} is not valid base64")]
    MalformedKey {
        /// The location whose content failed to decode
        location: String,
        /// Underlying decode error
        #[source]
        source: base64::DecodeError,
    },
}
