//! Random salt generation.

use rand::RngCore;

/// Generate `len` random bytes from the thread-local CSPRNG.
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
