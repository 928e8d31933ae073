//! Modular crypt format codec.
//!
//! A token is a delimiter-led string of four delimiter-separated segments:
//!
//! ```text
//! <d><scheme><d><work-factor><d><salt-b64><d><payload-b64>
//!
//! $sha512$10$c2FsdA==$            issued template, no payload yet
//! $sha512$10$c2FsdA==$Y2lwaGVy    complete token
//! ```
//!
//! The delimiter may be any character outside the base64 alphabet so that
//! splitting never cuts into a salt or payload segment.

use base64::Engine;

use crate::error::{Error, Result};
use crate::token::Token;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '$';

/// Characters a delimiter may never be (standard base64 plus padding).
pub const BASE64_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

/// Number of pieces produced by splitting a well-formed token on its delimiter.
const SEGMENT_COUNT: usize = 5;

const SCHEME_INDEX: usize = 1;
const WORK_FACTOR_INDEX: usize = 2;
const SALT_INDEX: usize = 3;
const PAYLOAD_INDEX: usize = 4;

/// Encode bytes as standard padded base64.
pub fn base64_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Decode a standard padded base64 string. The empty string decodes to no bytes.
pub fn base64_decode(data: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| Error::Format(format!("Invalid base64: {}", e)))
}

/// Reject delimiters that collide with the base64 alphabet.
pub fn validate_delimiter(delimiter: char) -> Result<()> {
    if BASE64_ALPHABET.contains(delimiter) {
        return Err(Error::Format(format!(
            "Invalid delimiter '{}': must not be a base64 character",
            delimiter
        )));
    }
    Ok(())
}

/// Parse a token string that must use `delimiter`.
pub fn parse(raw: &str, delimiter: char) -> Result<Token> {
    if raw.trim().is_empty() {
        return Err(Error::Format(
            "Token cannot be empty or whitespace".to_string(),
        ));
    }

    validate_delimiter(delimiter)?;

    if !raw.starts_with(delimiter) {
        return Err(Error::Format(format!(
            "Token must begin with delimiter '{}'",
            delimiter
        )));
    }

    let segments: Vec<&str> = raw.split(delimiter).collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(Error::Format(format!(
            "Expected {} segments, found {}",
            SEGMENT_COUNT - 1,
            segments.len() - 1
        )));
    }

    let work_factor = parse_work_factor(segments[WORK_FACTOR_INDEX])?;

    let salt = decode_segment("salt", segments[SALT_INDEX])?;
    let payload = decode_segment("payload", segments[PAYLOAD_INDEX])?;

    Token::new(
        delimiter,
        segments[SCHEME_INDEX],
        work_factor,
        salt,
        payload,
    )
}

/// Render a token. An absent payload renders as an empty trailing segment.
pub fn format(token: &Token) -> String {
    let d = token.delimiter();
    format!(
        "{d}{}{d}{}{d}{}{d}{}",
        token.scheme(),
        token.work_factor(),
        base64_encode(token.salt()),
        base64_encode(token.payload()),
    )
}

fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(segment)
        .map_err(|e| Error::Format(format!("Invalid {} segment: {}", name, e)))
}

/// Work factors are canonical unsigned decimal: no sign, no whitespace, no
/// leading zeros, so a parsed token always formats back to the same string.
fn parse_work_factor(segment: &str) -> Result<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Format(format!(
            "Invalid work factor segment: '{}'",
            segment
        )));
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(Error::Format(format!(
            "Work factor segment '{}' has a leading zero",
            segment
        )));
    }

    segment
        .parse::<u32>()
        .map_err(|e| Error::Format(format!("Invalid work factor segment: {}", e)))
}
