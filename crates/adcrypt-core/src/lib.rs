//! # adcrypt-core
//!
//! Core types, traits, and codec for adcrypt.
//!
//! A stored credential is a single self-describing token naming the scheme,
//! work factor, and salt that produced it:
//!
//! ```text
//! $sha512$10$<salt-b64>$<hash-b64>
//! ```
//!
//! Old tokens keep verifying under the settings they embed while new tokens
//! are issued under current defaults. This crate holds the token value type,
//! the codec that reads and writes it, and the capability traits concrete
//! primitives implement.
//!
//! ## Examples
//!
//! ```rust
//! use adcrypt_core::{codec, Token};
//!
//! let token = codec::parse("$sha512$10$c2FsdA==$Y2lwaGVy", '$').unwrap();
//! assert_eq!(token.scheme(), "sha512");
//! assert_eq!(token.work_factor(), 10);
//! assert_eq!(token.salt(), b"salt");
//! assert_eq!(codec::format(&token), "$sha512$10$c2FsdA==$Y2lwaGVy");
//!
//! // Delimiter inferred from the leading character
//! let same: Token = "$sha512$10$c2FsdA==$Y2lwaGVy".parse().unwrap();
//! assert_eq!(token, same);
//! ```

pub mod codec;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod token;
pub mod traits;
pub mod work_factor;

// Re-export commonly used types at crate root
pub use codec::{base64_decode, base64_encode, validate_delimiter, DEFAULT_DELIMITER};
pub use error::{Error, Result};
pub use token::Token;
pub use traits::{EncryptionService, HashingService, SchemeKind};
pub use work_factor::{check_work_factor, iterations, MAX_WORK_FACTOR, MIN_WORK_FACTOR};
