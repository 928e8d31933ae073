//! # adcrypt-service
//!
//! Scheme registry and dispatch for adcrypt tokens.
//!
//! New tokens are issued under configured defaults. Existing tokens are
//! verified, re-derived and decrypted under the scheme embedded in the token,
//! which lets a deployment move to new settings while still accepting tokens
//! issued under old ones.
//!
//! ## Examples
//!
//! ```rust
//! use adcrypt_crypto::{AesEncryptionService, Sha512HashingService};
//! use adcrypt_service::{AdaptiveCryptService, SchemeDefaults};
//!
//! let service = AdaptiveCryptService::builder()
//!     .with_hashing(
//!         SchemeDefaults::new("sha1", 4, 16).unwrap(),
//!         Sha512HashingService::new(b"hash-key".to_vec()),
//!     )
//!     .with_encryption(
//!         SchemeDefaults::new("aes1", 4, 16).unwrap(),
//!         AesEncryptionService::new(b"encryption-key".to_vec()),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let stored = service.hash(b"password").unwrap();
//! assert!(service.verify_hash(b"password", &stored).unwrap());
//!
//! let token = service.encrypt(b"foobar@example.com").unwrap();
//! assert_eq!(service.decrypt(&token).unwrap(), b"foobar@example.com");
//! ```

pub mod config;
pub mod registry;
pub mod salt;
pub mod service;

// Re-export commonly used types
pub use config::{SchemeDefaults, ServiceConfig};
pub use registry::SchemeRegistry;
pub use salt::generate_salt;
pub use service::{AdaptiveCryptService, AdaptiveCryptServiceBuilder, HashVerification};

pub use adcrypt_core::{Error, Result, Token};
