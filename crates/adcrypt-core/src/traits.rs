//! Capability traits implemented by concrete hashing and encryption providers.
//!
//! Implementations own work-factor expansion and key derivation. They are
//! shared across threads behind `Arc`, so every method takes `&self` and
//! must be reentrant.

use std::fmt;

use crate::error::Result;

/// Computes a keyed, salted hash whose cost is governed by a work factor.
pub trait HashingService: Send + Sync {
    /// Hash `data` with the given work factor and salt.
    ///
    /// Must be deterministic for fixed inputs. Fails with
    /// `WorkFactorOutOfRange` when the work factor is unsupported.
    fn hash(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>>;
}

/// Symmetric encryption whose key stretching is governed by a work factor.
pub trait EncryptionService: Send + Sync {
    /// Encrypt `data`. A pure function of its three inputs.
    fn encrypt(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>>;

    /// Invert [`encrypt`](Self::encrypt) for the same work factor and salt.
    ///
    /// Fails with `CorruptPayload` when the ciphertext does not authenticate.
    fn decrypt(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>>;
}

/// Which capability family a scheme identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    Hashing,
    Encryption,
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashing => write!(f, "hashing"),
            Self::Encryption => write!(f, "encryption"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Reverse;

    impl EncryptionService for Reverse {
        fn encrypt(&self, data: &[u8], _work_factor: u32, _salt: &[u8]) -> Result<Vec<u8>> {
            Ok(data.iter().rev().copied().collect())
        }

        fn decrypt(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>> {
            self.encrypt(data, work_factor, salt)
        }
    }

    #[test]
    fn test_trait_objects_are_shareable() {
        let service: Arc<dyn EncryptionService> = Arc::new(Reverse);
        let clone = Arc::clone(&service);
        let handle = std::thread::spawn(move || clone.encrypt(b"abc", 0, b"").unwrap());
        assert_eq!(handle.join().unwrap(), b"cba");
        assert_eq!(service.decrypt(b"cba", 0, b"").unwrap(), b"abc");
    }

    #[test]
    fn test_scheme_kind_display() {
        assert_eq!(SchemeKind::Hashing.to_string(), "hashing");
        assert_eq!(SchemeKind::Encryption.to_string(), "encryption");
    }
}
