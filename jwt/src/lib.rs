//! # Tokn
//!
//! Compact JWT codec for message pipelines.
//!
//! ## Features
//!
//! - **HS256**: HMAC-SHA256 signed tokens with constant-time verification
//! - **Explicit `none`**: unsigned tokens only behind a per-call opt-in
//! - **Algorithm binding**: the caller chooses the algorithm at both ends;
//!   the token header can only cause a mismatch error, never a downgrade
//! - **Token search**: find a token embedded in a larger text blob
//! - **Pipeline step**: a configured Create/Decode step driven against a
//!   host-supplied message bag
//!
//! ## Quick Start
//!
//! ```rust
//! use tokn_jwt::{create, decode, Algorithm, Claims};
//!
//! # fn main() -> tokn_jwt::Result<()> {
//! let mut claims = Claims::new();
//! claims.insert("sub".to_string(), "alice".into());
//!
//! let key: &[u8] = b"secret";
//! let token = create(&claims, Algorithm::HS256, Some(key), false)?;
//! let decoded = decode(&token, Algorithm::HS256, Some(key), false, false)?;
//! assert_eq!(decoded, claims);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod codec;
mod crypto;
mod encoding;
mod error;
mod find;
pub mod pipeline;
mod types;

pub use codec::{create, decode};
pub use error::{JwtError, Result};
pub use find::find_token;
pub use pipeline::{Exchange, Operation, OutputShape, Step, StepConfig};
pub use types::{Algorithm, Claims};

// Key resolution is re-exported so step hosts need only one dependency.
pub use tokn_key::{is_local, KeyError, KeyLocation};
