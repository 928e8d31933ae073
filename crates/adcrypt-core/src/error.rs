//! Error types for adcrypt.

use thiserror::Error;

/// Result type alias using adcrypt's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for token and capability operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed token string or token component.
    #[error("Invalid format: {0}")]
    Format(String),

    /// Blank identifier, missing implementation, or other bad argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Work factor outside the range a capability accepts.
    #[error("Work factor {work_factor} out of range (must be between {min} and {max} inclusive)")]
    WorkFactorOutOfRange {
        /// Rejected work factor.
        work_factor: u32,
        /// Smallest accepted work factor.
        min: u32,
        /// Largest accepted work factor.
        max: u32,
    },

    /// No capability registered under the scheme identifier.
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// A capability is already registered under the scheme identifier.
    #[error("Duplicate scheme: {0}")]
    DuplicateScheme(String),

    /// Payload could not be processed - wrong key or corrupted data.
    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for malformed token input.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// True for bad arguments, including out-of-range work factors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::WorkFactorOutOfRange { .. }
        )
    }

    /// True when a scheme lookup missed the registry.
    pub fn is_unsupported_scheme(&self) -> bool {
        matches!(self, Error::UnsupportedScheme(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_format() {
        let err = Error::Format("wrong segment count".to_string());
        assert_eq!(err.to_string(), "Invalid format: wrong segment count");
    }

    #[test]
    fn test_error_display_work_factor_range() {
        let err = Error::WorkFactorOutOfRange {
            work_factor: 31,
            min: 0,
            max: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("31"));
        assert!(msg.contains("between 0 and 30"));
    }

    #[test]
    fn test_error_display_unsupported_scheme() {
        let err = Error::UnsupportedScheme("sha1".to_string());
        assert_eq!(err.to_string(), "Unsupported scheme: sha1");
    }

    #[test]
    fn test_error_display_duplicate_scheme() {
        let err = Error::DuplicateScheme("aes".to_string());
        assert_eq!(err.to_string(), "Duplicate scheme: aes");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Format(String::new()).is_format());
        assert!(Error::InvalidArgument(String::new()).is_invalid_argument());
        assert!(Error::WorkFactorOutOfRange {
            work_factor: 99,
            min: 0,
            max: 30
        }
        .is_invalid_argument());
        assert!(Error::UnsupportedScheme(String::new()).is_unsupported_scheme());
        assert!(!Error::CorruptPayload(String::new()).is_unsupported_scheme());
        assert!(!Error::DuplicateScheme(String::new()).is_invalid_argument());
    }
}
