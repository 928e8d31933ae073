//! # adcrypt-crypto
//!
//! Concrete capability implementations for adcrypt.
//!
//! ## Cryptographic Primitives
//!
//! - **Key stretching**: PBKDF2-HMAC-SHA512, `2^work_factor` iterations
//! - **Hashing**: HMAC-SHA512 keyed by the stretched secret
//! - **Symmetric cipher**: AES-256-GCM (AEAD), key and nonce stretched from the secret
//!
//! Work factors outside `[0, 30]` are rejected before any work is done.
//!
//! ## Examples
//!
//! ```rust
//! use adcrypt_core::{EncryptionService, HashingService};
//! use adcrypt_crypto::{AesEncryptionService, Sha512HashingService};
//!
//! let hasher = Sha512HashingService::new(b"secret-hash-key".to_vec());
//! let digest = hasher.hash(b"password", 4, b"salt").unwrap();
//! assert_eq!(digest.len(), 64);
//!
//! let cipher = AesEncryptionService::new(b"secret-encryption-key".to_vec());
//! let ciphertext = cipher.encrypt(b"foobar@example.com", 4, b"salt").unwrap();
//! let plaintext = cipher.decrypt(&ciphertext, 4, b"salt").unwrap();
//! assert_eq!(plaintext, b"foobar@example.com");
//! ```

pub mod cipher;
pub mod hashing;
pub mod kdf;

// Re-export commonly used types
pub use cipher::AesEncryptionService;
pub use hashing::Sha512HashingService;
pub use kdf::{stretch, SecretKey};
