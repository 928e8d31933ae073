//! Key stretching with PBKDF2-HMAC-SHA512.
//!
//! The work factor selects the iteration count (`2^work_factor`). Salts
//! shorter than [`MIN_SALT_LENGTH`] are right-padded with zero bytes before
//! use, so an empty salt is still accepted.

use std::borrow::Cow;

use adcrypt_core::{iterations, Result};
use sha2::Sha512;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Salts are padded to at least this many bytes.
pub const MIN_SALT_LENGTH: usize = 8;

/// Secret key material with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wrap raw key bytes. An empty key is permitted.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Zero-pad a salt up to [`MIN_SALT_LENGTH`].
pub fn pad_salt(salt: &[u8]) -> Cow<'_, [u8]> {
    if salt.len() >= MIN_SALT_LENGTH {
        return Cow::Borrowed(salt);
    }
    let mut padded = salt.to_vec();
    padded.resize(MIN_SALT_LENGTH, 0);
    Cow::Owned(padded)
}

/// Derive `len` bytes from `key` and `salt` with `2^work_factor` iterations.
///
/// Fails with `WorkFactorOutOfRange` before doing any work if the work
/// factor is unsupported.
pub fn stretch(
    key: &SecretKey,
    salt: &[u8],
    work_factor: u32,
    len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let rounds = iterations(work_factor)?;
    let salt = pad_salt(salt);

    trace!(
        subsystem = "crypto",
        component = "kdf",
        op = "stretch",
        work_factor,
        iterations = rounds,
        salt_len = salt.len(),
        "Stretching key"
    );

    let mut out = Zeroizing::new(vec![0u8; len]);
    pbkdf2::pbkdf2_hmac::<Sha512>(key.as_bytes(), &salt, rounds, &mut out);
    Ok(out)
}
