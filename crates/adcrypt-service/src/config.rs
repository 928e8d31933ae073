//! Defaults governing freshly issued tokens.
//!
//! Read from environment variables with fallback to the built-in defaults
//! in `adcrypt_core::defaults`. Invalid values are logged and ignored.

use adcrypt_core::defaults::{
    ENCRYPTION_SALT_LENGTH, ENCRYPTION_SCHEME, ENCRYPTION_WORK_FACTOR, ENV_DELIMITER,
    ENV_ENCRYPT_PREFIX, ENV_HASH_PREFIX, ENV_SALT_LENGTH_SUFFIX, ENV_SCHEME_SUFFIX,
    ENV_WORK_FACTOR_SUFFIX, HASHING_SALT_LENGTH, HASHING_SCHEME, HASHING_WORK_FACTOR,
    MAX_SALT_LENGTH,
};
use adcrypt_core::{check_work_factor, validate_delimiter, Error, Result, DEFAULT_DELIMITER};
use serde::{Deserialize, Serialize};

/// Scheme, work factor and salt length used for new tokens of one kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemeDefaults {
    identifier: String,
    work_factor: u32,
    salt_length: usize,
}

impl SchemeDefaults {
    /// Create validated defaults. The identifier is trimmed.
    pub fn new(identifier: &str, work_factor: u32, salt_length: usize) -> Result<Self> {
        let defaults = Self {
            identifier: identifier.trim().to_string(),
            work_factor,
            salt_length,
        };
        defaults.validate()?;
        Ok(defaults)
    }

    /// Built-in hashing defaults (`sha512`, work factor 10, 16-byte salt).
    pub fn hashing() -> Self {
        Self {
            identifier: HASHING_SCHEME.to_string(),
            work_factor: HASHING_WORK_FACTOR,
            salt_length: HASHING_SALT_LENGTH,
        }
    }

    /// Built-in encryption defaults (`aes`, work factor 10, 16-byte salt).
    pub fn encryption() -> Self {
        Self {
            identifier: ENCRYPTION_SCHEME.to_string(),
            work_factor: ENCRYPTION_WORK_FACTOR,
            salt_length: ENCRYPTION_SALT_LENGTH,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }

    pub fn salt_length(&self) -> usize {
        self.salt_length
    }

    /// Check the identifier is non-blank and the numbers are in range.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Default scheme identifier cannot be empty or whitespace".to_string(),
            ));
        }
        check_work_factor(self.work_factor)?;
        if self.salt_length > MAX_SALT_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "Salt length {} exceeds maximum of {}",
                self.salt_length, MAX_SALT_LENGTH
            )));
        }
        Ok(())
    }

    /// Load `{prefix}_SCHEME`, `{prefix}_WORK_FACTOR` and `{prefix}_SALT_LENGTH`,
    /// keeping `fallback` values for anything unset or invalid.
    ///
    /// Scheme values are checked against the default `$` delimiter.
    pub fn from_env(prefix: &str, fallback: Self) -> Self {
        Self::from_env_with_delimiter(prefix, fallback, DEFAULT_DELIMITER)
    }

    /// Like [`from_env`](Self::from_env), rejecting scheme values that
    /// contain whitespace or `delimiter`.
    pub fn from_env_with_delimiter(prefix: &str, fallback: Self, delimiter: char) -> Self {
        let mut config = fallback;

        let scheme_var = format!("{}_{}", prefix, ENV_SCHEME_SUFFIX);
        if let Ok(val) = std::env::var(&scheme_var) {
            let trimmed = val.trim();
            if trimmed.is_empty()
                || trimmed.contains(|c: char| c.is_whitespace() || c == delimiter)
            {
                tracing::warn!(var = %scheme_var, value = %val, "Invalid scheme identifier, using default");
            } else {
                config.identifier = trimmed.to_string();
            }
        }

        let work_factor_var = format!("{}_{}", prefix, ENV_WORK_FACTOR_SUFFIX);
        if let Ok(val) = std::env::var(&work_factor_var) {
            match val.trim().parse::<u32>() {
                Ok(wf) if check_work_factor(wf).is_ok() => config.work_factor = wf,
                _ => {
                    tracing::warn!(var = %work_factor_var, value = %val, "Invalid work factor, using default")
                }
            }
        }

        let salt_length_var = format!("{}_{}", prefix, ENV_SALT_LENGTH_SUFFIX);
        if let Ok(val) = std::env::var(&salt_length_var) {
            match val.trim().parse::<usize>() {
                Ok(len) if len <= MAX_SALT_LENGTH => config.salt_length = len,
                _ => {
                    tracing::warn!(var = %salt_length_var, value = %val, "Invalid salt length, using default")
                }
            }
        }

        config
    }
}

/// Full service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Delimiter for freshly issued tokens.
    pub delimiter: char,
    /// Defaults for new hashes.
    pub hashing: SchemeDefaults,
    /// Defaults for new ciphertexts.
    pub encryption: SchemeDefaults,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            hashing: SchemeDefaults::hashing(),
            encryption: SchemeDefaults::encryption(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables with fallback to defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ADCRYPT_DELIMITER` | `$` |
    /// | `ADCRYPT_HASH_SCHEME` | `sha512` |
    /// | `ADCRYPT_HASH_WORK_FACTOR` | `10` |
    /// | `ADCRYPT_HASH_SALT_LENGTH` | `16` |
    /// | `ADCRYPT_ENCRYPT_SCHEME` | `aes` |
    /// | `ADCRYPT_ENCRYPT_WORK_FACTOR` | `10` |
    /// | `ADCRYPT_ENCRYPT_SALT_LENGTH` | `16` |
    pub fn from_env() -> Self {
        let mut delimiter = DEFAULT_DELIMITER;
        if let Ok(val) = std::env::var(ENV_DELIMITER) {
            let mut chars = val.chars();
            match (chars.next(), chars.next()) {
                (Some(d), None) if validate_delimiter(d).is_ok() => delimiter = d,
                _ => tracing::warn!(value = %val, "Invalid ADCRYPT_DELIMITER, using default"),
            }
        }

        Self {
            delimiter,
            hashing: SchemeDefaults::from_env_with_delimiter(
                ENV_HASH_PREFIX,
                SchemeDefaults::hashing(),
                delimiter,
            ),
            encryption: SchemeDefaults::from_env_with_delimiter(
                ENV_ENCRYPT_PREFIX,
                SchemeDefaults::encryption(),
                delimiter,
            ),
        }
    }

    /// Validate every field.
    ///
    /// Any problem is reported as `Error::Config`, including a default scheme
    /// that contains the delimiter.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|e| Error::Config(e.to_string()))
    }

    fn check(&self) -> Result<()> {
        validate_delimiter(self.delimiter)?;
        for defaults in [&self.hashing, &self.encryption] {
            defaults.validate()?;
            if defaults.identifier().contains(self.delimiter) {
                return Err(Error::Format(format!(
                    "Default scheme '{}' contains the delimiter '{}'",
                    defaults.identifier(),
                    self.delimiter
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_identifier() {
        let defaults = SchemeDefaults::new("  sha2 ", 11, 8).unwrap();
        assert_eq!(defaults.identifier(), "sha2");
        assert_eq!(defaults.work_factor(), 11);
        assert_eq!(defaults.salt_length(), 8);
    }

    #[test]
    fn test_new_rejects_blank_identifier() {
        let err = SchemeDefaults::new(" ", 10, 8).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_new_rejects_out_of_range_work_factor() {
        let err = SchemeDefaults::new("sha512", 31, 8).unwrap_err();
        assert!(matches!(err, Error::WorkFactorOutOfRange { .. }));
    }

    #[test]
    fn test_new_rejects_oversized_salt() {
        assert!(SchemeDefaults::new("sha512", 10, MAX_SALT_LENGTH + 1).is_err());
        assert!(SchemeDefaults::new("sha512", 10, 0).is_ok());
    }

    #[test]
    fn test_builtin_defaults_are_valid() {
        assert!(SchemeDefaults::hashing().validate().is_ok());
        assert!(SchemeDefaults::encryption().validate().is_ok());
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_env_unset_uses_fallback() {
        let config = SchemeDefaults::from_env("ADCRYPT_TEST_UNSET", SchemeDefaults::hashing());
        assert_eq!(config, SchemeDefaults::hashing());
    }

    #[test]
    fn test_from_env_reads_values() {
        std::env::set_var("ADCRYPT_TEST_READ_SCHEME", "sha2");
        std::env::set_var("ADCRYPT_TEST_READ_WORK_FACTOR", "12");
        std::env::set_var("ADCRYPT_TEST_READ_SALT_LENGTH", "32");

        let config = SchemeDefaults::from_env("ADCRYPT_TEST_READ", SchemeDefaults::hashing());
        assert_eq!(config.identifier(), "sha2");
        assert_eq!(config.work_factor(), 12);
        assert_eq!(config.salt_length(), 32);
    }

    #[test]
    fn test_from_env_ignores_invalid_values() {
        std::env::set_var("ADCRYPT_TEST_BAD_SCHEME", "  ");
        std::env::set_var("ADCRYPT_TEST_BAD_WORK_FACTOR", "31");
        std::env::set_var("ADCRYPT_TEST_BAD_SALT_LENGTH", "lots");

        let config = SchemeDefaults::from_env("ADCRYPT_TEST_BAD", SchemeDefaults::encryption());
        assert_eq!(config, SchemeDefaults::encryption());
    }

    #[test]
    fn test_from_env_rejects_scheme_with_delimiter() {
        std::env::set_var("ADCRYPT_TEST_DELIM_SCHEME", "sha$512");
        let config = SchemeDefaults::from_env("ADCRYPT_TEST_DELIM", SchemeDefaults::hashing());
        assert_eq!(config.identifier(), HASHING_SCHEME);
    }

    #[test]
    fn test_from_env_rejects_scheme_with_custom_delimiter() {
        std::env::set_var("ADCRYPT_TEST_PIPE_SCHEME", "sha|2");
        let config = SchemeDefaults::from_env_with_delimiter(
            "ADCRYPT_TEST_PIPE",
            SchemeDefaults::hashing(),
            '|',
        );
        assert_eq!(config.identifier(), HASHING_SCHEME);

        std::env::set_var("ADCRYPT_TEST_PIPE_OK_SCHEME", "sha$2");
        let config = SchemeDefaults::from_env_with_delimiter(
            "ADCRYPT_TEST_PIPE_OK",
            SchemeDefaults::hashing(),
            '|',
        );
        assert_eq!(config.identifier(), "sha$2");
    }

    #[test]
    fn test_validate_reports_config_error() {
        let config = ServiceConfig {
            delimiter: '+',
            ..ServiceConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ServiceConfig {
            delimiter: '|',
            hashing: SchemeDefaults::new("sha|2", 10, 16).unwrap(),
            ..ServiceConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("sha|2"));
    }

    #[test]
    fn test_validate_rejects_deserialized_out_of_range_work_factor() {
        let json = r#"{
            "delimiter": "$",
            "hashing": {"identifier": "sha512", "work_factor": 31, "salt_length": 16},
            "encryption": {"identifier": "aes", "work_factor": 10, "salt_length": 16}
        }"#;
        let config: ServiceConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_serialization() {
        let config = ServiceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
