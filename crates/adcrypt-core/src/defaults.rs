//! Built-in defaults and environment variable names.
//!
//! Anything here can be overridden through the environment; see
//! `adcrypt_service::config`.

// =============================================================================
// HASHING
// =============================================================================

/// Scheme identifier for freshly issued hashes.
pub const HASHING_SCHEME: &str = "sha512";

/// Work factor for freshly issued hashes (1024 iterations).
pub const HASHING_WORK_FACTOR: u32 = 10;

/// Salt length in bytes for freshly issued hashes.
pub const HASHING_SALT_LENGTH: usize = 16;

// =============================================================================
// ENCRYPTION
// =============================================================================

/// Scheme identifier for freshly issued ciphertexts.
pub const ENCRYPTION_SCHEME: &str = "aes";

/// Work factor for freshly issued ciphertexts (1024 iterations).
pub const ENCRYPTION_WORK_FACTOR: u32 = 10;

/// Salt length in bytes for freshly issued ciphertexts.
pub const ENCRYPTION_SALT_LENGTH: usize = 16;

/// Upper bound on configured salt lengths.
pub const MAX_SALT_LENGTH: usize = 1024;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Prefix for hashing defaults (`ADCRYPT_HASH_SCHEME`, ...).
pub const ENV_HASH_PREFIX: &str = "ADCRYPT_HASH";

/// Prefix for encryption defaults (`ADCRYPT_ENCRYPT_SCHEME`, ...).
pub const ENV_ENCRYPT_PREFIX: &str = "ADCRYPT_ENCRYPT";

/// Suffix naming the scheme identifier variable.
pub const ENV_SCHEME_SUFFIX: &str = "SCHEME";

/// Suffix naming the work factor variable.
pub const ENV_WORK_FACTOR_SUFFIX: &str = "WORK_FACTOR";

/// Suffix naming the salt length variable.
pub const ENV_SALT_LENGTH_SUFFIX: &str = "SALT_LENGTH";

/// Delimiter override.
pub const ENV_DELIMITER: &str = "ADCRYPT_DELIMITER";
