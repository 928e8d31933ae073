//! Self-describing crypt token.
//!
//! A [`Token`] records which scheme produced a payload, the work factor it
//! was produced with, and the salt it used, so the same settings can be
//! recovered from the stored string alone.

use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::error::{Error, Result};

/// Immutable modular crypt token.
///
/// Equality and hashing are structural over the delimiter, scheme, work
/// factor and the byte contents of salt and payload. A template token (one
/// still awaiting computation) carries an empty payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    delimiter: char,
    scheme: String,
    work_factor: u32,
    salt: Vec<u8>,
    payload: Vec<u8>,
}

impl Token {
    /// Create a token, validating the delimiter and scheme.
    ///
    /// The scheme may be empty but must not contain the delimiter.
    pub fn new(
        delimiter: char,
        scheme: impl Into<String>,
        work_factor: u32,
        salt: impl Into<Vec<u8>>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        codec::validate_delimiter(delimiter)?;

        let scheme = scheme.into();
        if scheme.contains(delimiter) {
            return Err(Error::Format(format!(
                "Scheme '{}' contains the delimiter '{}'",
                scheme, delimiter
            )));
        }

        Ok(Self {
            delimiter,
            scheme,
            work_factor,
            salt: salt.into(),
            payload: payload.into(),
        })
    }

    /// Create a token with no payload yet.
    pub fn template(
        delimiter: char,
        scheme: impl Into<String>,
        work_factor: u32,
        salt: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        Self::new(delimiter, scheme, work_factor, salt, Vec::new())
    }

    /// Parse a token string that must use `delimiter`.
    pub fn parse(raw: &str, delimiter: char) -> Result<Self> {
        codec::parse(raw, delimiter)
    }

    /// A new token with the same settings and the given payload.
    pub fn with_payload(&self, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            delimiter: self.delimiter,
            scheme: self.scheme.clone(),
            work_factor: self.work_factor,
            salt: self.salt.clone(),
            payload: payload.into(),
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether a hash or ciphertext has been computed for this token.
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }

    pub fn salt_base64(&self) -> String {
        codec::base64_encode(&self.salt)
    }

    pub fn payload_base64(&self) -> String {
        codec::base64_encode(&self.payload)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format(self))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("delimiter", &self.delimiter)
            .field("scheme", &self.scheme)
            .field("work_factor", &self.work_factor)
            .field("salt_len", &self.salt.len())
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// Parses with the delimiter taken from the leading character.
impl FromStr for Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let delimiter = s
            .chars()
            .next()
            .ok_or_else(|| Error::Format("Token cannot be empty or whitespace".to_string()))?;
        codec::parse(s, delimiter)
    }
}

impl serde::Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&codec::format(self))
    }
}

impl<'de> serde::Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
