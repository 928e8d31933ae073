//! AES-256-GCM encryption capability.
//!
//! The AES key and the nonce are both stretched from the service secret,
//! the token salt, and the work factor. Every issued token carries a fresh
//! random salt, which is what keeps nonces unique across tokens.

use adcrypt_core::{EncryptionService, Error, Result};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use crate::kdf::{stretch, SecretKey};

/// AES-256 key length.
pub const KEY_LENGTH: usize = 32;

/// GCM nonce length.
pub const NONCE_LENGTH: usize = 12;

/// Authentication tag appended to every ciphertext.
pub const TAG_LENGTH: usize = 16;

/// Encrypts data with AES-256-GCM under key material stretched from a
/// secret, the token salt, and the work factor.
#[derive(Debug, Clone)]
pub struct AesEncryptionService {
    key: SecretKey,
}

impl AesEncryptionService {
    /// Create a service keyed by `key`. An empty key is permitted.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: SecretKey::from_bytes(key),
        }
    }

    fn cipher(&self, work_factor: u32, salt: &[u8]) -> Result<(Aes256Gcm, [u8; NONCE_LENGTH])> {
        let material = stretch(&self.key, salt, work_factor, KEY_LENGTH + NONCE_LENGTH)?;

        let cipher = Aes256Gcm::new_from_slice(&material[..KEY_LENGTH])
            .map_err(|e| Error::InvalidArgument(format!("AES key rejected: {}", e)))?;

        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(&material[KEY_LENGTH..]);

        Ok((cipher, nonce))
    }
}

impl EncryptionService for AesEncryptionService {
    /// Returns ciphertext with the authentication tag appended.
    fn encrypt(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>> {
        let (cipher, nonce) = self.cipher(work_factor, salt)?;

        cipher
            .encrypt(Nonce::from_slice(&nonce), data)
            .map_err(|_| Error::CorruptPayload("AES-GCM encryption failed".to_string()))
    }

    fn decrypt(&self, data: &[u8], work_factor: u32, salt: &[u8]) -> Result<Vec<u8>> {
        let (cipher, nonce) = self.cipher(work_factor, salt)?;

        cipher.decrypt(Nonce::from_slice(&nonce), data).map_err(|_| {
            Error::CorruptPayload(
                "AES-GCM decryption failed - wrong key or corrupted data".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AesEncryptionService {
        AesEncryptionService::new(b"key".to_vec())
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let s = service();
        for plaintext in [&b""[..], b" ", b"unencrypted"] {
            for wf in [0, 1, 4] {
                for salt in [&b""[..], b" ", b"salt"] {
                    let ciphertext = s.encrypt(plaintext, wf, salt).unwrap();
                    assert_ne!(ciphertext.as_slice(), plaintext);
                    let decrypted = s.decrypt(&ciphertext, wf, salt).unwrap();
                    assert_eq!(decrypted.as_slice(), plaintext);
                }
            }
        }
    }

    #[test]
    fn test_ciphertext_longer_than_plaintext() {
        let plaintext = b"Hello, World!";
        let ciphertext = service().encrypt(plaintext, 1, b"salt").unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_LENGTH);
    }

    #[test]
    fn test_encrypt_is_pure_function_of_inputs() {
        let s = service();
        let a = s.encrypt(b"data", 2, b"salt").unwrap();
        let b = s.encrypt(b"data", 2, b"salt").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_salts_different_ciphertext() {
        let s = service();
        let a = s.encrypt(b"Same message", 2, b"salt-one").unwrap();
        let b = s.encrypt(b"Same message", 2, b"salt-two").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_keys_different_ciphertext() {
        let a = service().encrypt(b"Same message", 2, b"salt").unwrap();
        let b = AesEncryptionService::new(b"other".to_vec())
            .encrypt(b"Same message", 2, b"salt")
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let ciphertext = service().encrypt(b"Secret data", 2, b"salt").unwrap();
        let result = AesEncryptionService::new(b"wrong".to_vec()).decrypt(&ciphertext, 2, b"salt");
        assert!(matches!(result, Err(Error::CorruptPayload(_))));
    }

    #[test]
    fn test_decrypt_wrong_work_factor() {
        let ciphertext = service().encrypt(b"Secret data", 2, b"salt").unwrap();
        let result = service().decrypt(&ciphertext, 3, b"salt");
        assert!(matches!(result, Err(Error::CorruptPayload(_))));
    }

    #[test]
    fn test_decrypt_tampered_ciphertext() {
        let mut ciphertext = service().encrypt(b"Secret data", 2, b"salt").unwrap();
        ciphertext[0] ^= 0xFF;
        let result = service().decrypt(&ciphertext, 2, b"salt");
        assert!(matches!(result, Err(Error::CorruptPayload(_))));
    }

    #[test]
    fn test_decrypt_truncated_ciphertext() {
        let result = service().decrypt(b"short", 2, b"salt");
        assert!(matches!(result, Err(Error::CorruptPayload(_))));
    }

    #[test]
    fn test_rejects_out_of_range_work_factor() {
        for wf in [31, 50] {
            assert!(service()
                .encrypt(b"unencrypted", wf, b"salt")
                .unwrap_err()
                .is_invalid_argument());
            assert!(service()
                .decrypt(b"whatever", wf, b"salt")
                .unwrap_err()
                .is_invalid_argument());
        }
    }
}
