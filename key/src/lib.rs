//! # Tokn Key Resolution
//!
//! Local-only key material resolution for the tokn token codec.
//!
//! ## Features
//!
//! - **Location grammar**: explicit `file:` and `env:` schemes only
//! - **Network refusal**: HTTP(S) locations are rejected before any I/O
//! - **Base64 key files**: resource text is decoded into raw key bytes
//! - **Zeroized buffers**: key material is wiped on drop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # fn main() -> Result<(), tokn_key::KeyError> {
//! let key = tokn_key::resolve("file:/etc/tokn/hmac.key")?;
//! assert!(!key.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod location;
mod resolver;

pub use error::{KeyError, Result};
pub use location::{is_local, KeyLocation};
pub use resolver::resolve;
