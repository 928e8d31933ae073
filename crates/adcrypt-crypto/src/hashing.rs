//! HMAC-SHA512 hashing capability.

use adcrypt_core::{Error, HashingService, Result};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::kdf::{stretch, SecretKey};

type HmacSha512 = Hmac<Sha512>;

/// Length of the stretched HMAC key (128 bytes, the SHA-512 block size).
pub const HMAC_KEY_LENGTH: usize = 128;

/// Length of the produced digest.
pub const DIGEST_LENGTH: usize = 64;

/// Hashes data with HMAC-SHA512 under a key stretched from a secret,
/// the token salt, and the work factor.
#[derive(Debug, Clone)]
pub struct Sha512HashingService {
    key: SecretKey,
}

impl Sha512HashingService {
    /// Create a service keyed by `key`. An empty key is permitted.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: SecretKey::from_bytes(key),
        }
    }
}

impl HashingService for Sha512HashingService {
    fn hash(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>> {
        let hmac_key = stretch(&self.key, salt, work_factor, HMAC_KEY_LENGTH)?;

        let mut mac = HmacSha512::new_from_slice(&hmac_key)
            .map_err(|e| Error::InvalidArgument(format!("HMAC key rejected: {}", e)))?;
        mac.update(data);

        Ok(mac.finalize().into_bytes().to_vec())
    }
}
