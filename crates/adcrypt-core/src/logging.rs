//! Structured logging schema and field name constants for adcrypt.
//!
//! All crates use these names for structured `tracing` fields so log
//! aggregation can query every subsystem the same way.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Construction-time invariant violated (default scheme missing) |
//! | WARN  | Expected runtime miss: token names an unregistered scheme |
//! | INFO  | Service construction, scheme registration |
//! | DEBUG | Issue, verify, and decrypt completions |
//! | TRACE | Key-stretching details inside primitives |
//!
//! Data, keys, salts and payloads are never logged. Only their lengths are.

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event. Always "crypto".
pub const SUBSYSTEM: &str = "subsystem";

/// Component within the subsystem.
/// Values: "adaptive_crypt", "sha512_hashing", "aes_encryption", "kdf"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "hash", "verify", "encrypt", "decrypt", "register"
pub const OPERATION: &str = "op";

// ─── Token fields ──────────────────────────────────────────────────────────

/// Scheme identifier selecting the capability.
pub const SCHEME: &str = "scheme";

/// Capability family ("hashing", "encryption").
pub const SCHEME_KIND: &str = "kind";

/// Work factor exponent (iterations = 2^work_factor).
pub const WORK_FACTOR: &str = "work_factor";

/// Salt length in bytes.
pub const SALT_LEN: &str = "salt_len";

/// Payload (hash digest or ciphertext) length in bytes.
pub const PAYLOAD_LEN: &str = "payload_len";

/// Input data length in bytes.
pub const DATA_LEN: &str = "data_len";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of iterations performed by key stretching.
pub const ITERATIONS: &str = "iterations";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Every field name above, for schema checks.
pub const ALL_FIELDS: &[&str] = &[
    SUBSYSTEM,
    COMPONENT,
    OPERATION,
    SCHEME,
    SCHEME_KIND,
    WORK_FACTOR,
    SALT_LEN,
    PAYLOAD_LEN,
    DATA_LEN,
    DURATION_MS,
    ITERATIONS,
    SUCCESS,
    ERROR_MSG,
];
