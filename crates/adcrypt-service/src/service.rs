//! Adaptive crypt service: scheme registry plus dispatch.
//!
//! Freshly issued tokens use the configured defaults. Every operation on an
//! existing token dispatches on the scheme embedded in that token, never on
//! the defaults, so tokens issued under retired settings keep working as long
//! as their scheme stays registered.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use adcrypt_core::{
    validate_delimiter, EncryptionService, Error, HashingService, Result, SchemeKind, Token,
    DEFAULT_DELIMITER,
};
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::config::{SchemeDefaults, ServiceConfig};
use crate::registry::SchemeRegistry;
use crate::salt::generate_salt;

/// Outcome of [`AdaptiveCryptService::verify_and_upgrade`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashVerification {
    /// Candidate data does not match the stored token.
    Mismatch,
    /// Match, and the stored token already uses the current defaults.
    Valid,
    /// Match; the stored token used older settings and should be replaced
    /// with the contained token.
    Upgraded(Token),
}

impl HashVerification {
    /// True for `Valid` and `Upgraded`.
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::Mismatch)
    }

    /// The replacement token, if the stored one should be persisted again.
    pub fn upgraded_token(&self) -> Option<&Token> {
        match self {
            Self::Upgraded(token) => Some(token),
            _ => None,
        }
    }
}

/// Registry of hashing and encryption schemes with default-scheme policy.
///
/// Cheap to share behind an `Arc`; all operations take `&self` and may run
/// concurrently with each other and with registration.
pub struct AdaptiveCryptService {
    delimiter: char,
    hashing_defaults: Option<SchemeDefaults>,
    encryption_defaults: Option<SchemeDefaults>,
    hashing: SchemeRegistry<dyn HashingService>,
    encryption: SchemeRegistry<dyn EncryptionService>,
}

impl AdaptiveCryptService {
    /// Start building a service.
    pub fn builder() -> AdaptiveCryptServiceBuilder {
        AdaptiveCryptServiceBuilder::new()
    }

    /// Build a service with both kinds configured from `config`.
    ///
    /// An invalid `config` fails with `Error::Config`.
    pub fn from_config<H, E>(config: &ServiceConfig, hashing: H, encryption: E) -> Result<Self>
    where
        H: HashingService + 'static,
        E: EncryptionService + 'static,
    {
        config.validate()?;
        Self::builder()
            .with_delimiter(config.delimiter)
            .with_hashing(config.hashing.clone(), hashing)
            .with_encryption(config.encryption.clone(), encryption)
            .build()
    }

    // ─── Hashing ───────────────────────────────────────────────────────────

    /// Hash `data` under the default hashing scheme with a fresh salt.
    pub fn hash(&self, data: &[u8]) -> Result<Token> {
        let start = Instant::now();
        let template = self.issue_template(SchemeKind::Hashing)?;
        let service = self.default_service(&self.hashing, template.scheme())?;

        let payload = service.hash(data, template.work_factor(), template.salt())?;
        let token = template.with_payload(payload);

        debug!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "hash",
            scheme = %token.scheme(),
            work_factor = token.work_factor(),
            data_len = data.len(),
            salt_len = token.salt().len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Issued hash token"
        );
        Ok(token)
    }

    /// Recompute the hash of `data` with the scheme, work factor and salt of
    /// `prior`.
    ///
    /// The result equals `prior` exactly when `data` is what produced it.
    pub fn hash_with(&self, data: &[u8], prior: &Token) -> Result<Token> {
        let start = Instant::now();
        let service = self.embedded_service(&self.hashing, prior, "hash_with")?;

        let payload = service.hash(data, prior.work_factor(), prior.salt())?;
        let token = prior.with_payload(payload);

        debug!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "hash_with",
            scheme = %token.scheme(),
            work_factor = token.work_factor(),
            data_len = data.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Recomputed hash token"
        );
        Ok(token)
    }

    /// Check `data` against a stored hash token.
    ///
    /// A mismatch is `Ok(false)`. Errors are reserved for tokens whose scheme
    /// is not registered or whose work factor the scheme rejects. Payloads
    /// are compared in constant time.
    pub fn verify_hash(&self, data: &[u8], stored: &Token) -> Result<bool> {
        let candidate = self.hash_with(data, stored)?;
        let matched = constant_time_eq(candidate.payload(), stored.payload());

        debug!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "verify",
            scheme = %stored.scheme(),
            success = matched,
            "Verified hash token"
        );
        Ok(matched)
    }

    /// Verify `data` and, on a match against outdated settings, issue a
    /// replacement under the current defaults.
    pub fn verify_and_upgrade(&self, data: &[u8], stored: &Token) -> Result<HashVerification> {
        if !self.verify_hash(data, stored)? {
            return Ok(HashVerification::Mismatch);
        }
        if !self.needs_rehash(stored) {
            return Ok(HashVerification::Valid);
        }

        let upgraded = self.hash(data)?;
        info!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "upgrade",
            kind = %SchemeKind::Hashing,
            from_scheme = %stored.scheme(),
            from_work_factor = stored.work_factor(),
            scheme = %upgraded.scheme(),
            work_factor = upgraded.work_factor(),
            "Upgraded hash token to current defaults"
        );
        Ok(HashVerification::Upgraded(upgraded))
    }

    /// True when `token` was not issued under the current hashing defaults.
    ///
    /// Always false when no hashing defaults are configured.
    pub fn needs_rehash(&self, token: &Token) -> bool {
        differs_from(self.hashing_defaults.as_ref(), token)
    }

    /// Register an additional hashing scheme.
    pub fn add_hashing_service<H>(&self, identifier: &str, service: H) -> Result<()>
    where
        H: HashingService + 'static,
    {
        self.hashing.register(identifier, Arc::new(service)).map(|_| ())
    }

    /// Registered hashing scheme identifiers, sorted.
    pub fn hashing_schemes(&self) -> Vec<String> {
        self.hashing.identifiers()
    }

    pub fn has_hashing_service(&self, identifier: &str) -> bool {
        self.hashing.contains(identifier)
    }

    pub fn hashing_defaults(&self) -> Option<&SchemeDefaults> {
        self.hashing_defaults.as_ref()
    }

    // ─── Encryption ────────────────────────────────────────────────────────

    /// Encrypt `data` under the default encryption scheme with a fresh salt.
    pub fn encrypt(&self, data: &[u8]) -> Result<Token> {
        let start = Instant::now();
        let template = self.issue_template(SchemeKind::Encryption)?;
        let service = self.default_service(&self.encryption, template.scheme())?;

        let payload = service.encrypt(data, template.work_factor(), template.salt())?;
        let token = template.with_payload(payload);

        debug!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "encrypt",
            scheme = %token.scheme(),
            work_factor = token.work_factor(),
            data_len = data.len(),
            payload_len = token.payload().len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Issued encryption token"
        );
        Ok(token)
    }

    /// Encrypt `data` with the scheme, work factor and salt of `prior`.
    pub fn encrypt_with(&self, data: &[u8], prior: &Token) -> Result<Token> {
        let start = Instant::now();
        let service = self.embedded_service(&self.encryption, prior, "encrypt_with")?;

        let payload = service.encrypt(data, prior.work_factor(), prior.salt())?;
        let token = prior.with_payload(payload);

        debug!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "encrypt_with",
            scheme = %token.scheme(),
            work_factor = token.work_factor(),
            data_len = data.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Re-derived encryption token"
        );
        Ok(token)
    }

    /// Decrypt `token` under its embedded scheme.
    pub fn decrypt(&self, token: &Token) -> Result<Vec<u8>> {
        let start = Instant::now();
        let service = self.embedded_service(&self.encryption, token, "decrypt")?;

        let plaintext = service.decrypt(token.payload(), token.work_factor(), token.salt())?;

        debug!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "decrypt",
            scheme = %token.scheme(),
            work_factor = token.work_factor(),
            payload_len = token.payload().len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Decrypted token"
        );
        Ok(plaintext)
    }

    /// Decrypt `token` and encrypt the plaintext again under the current
    /// encryption defaults.
    pub fn reencrypt(&self, token: &Token) -> Result<Token> {
        let plaintext = Zeroizing::new(self.decrypt(token)?);
        self.encrypt(&plaintext)
    }

    /// True when `token` was not issued under the current encryption defaults.
    ///
    /// Always false when no encryption defaults are configured.
    pub fn needs_reencrypt(&self, token: &Token) -> bool {
        differs_from(self.encryption_defaults.as_ref(), token)
    }

    /// Register an additional encryption scheme.
    pub fn add_encryption_service<E>(&self, identifier: &str, service: E) -> Result<()>
    where
        E: EncryptionService + 'static,
    {
        self.encryption
            .register(identifier, Arc::new(service))
            .map(|_| ())
    }

    /// Registered encryption scheme identifiers, sorted.
    pub fn encryption_schemes(&self) -> Vec<String> {
        self.encryption.identifiers()
    }

    pub fn has_encryption_service(&self, identifier: &str) -> bool {
        self.encryption.contains(identifier)
    }

    pub fn encryption_defaults(&self) -> Option<&SchemeDefaults> {
        self.encryption_defaults.as_ref()
    }

    // ─── Shared ────────────────────────────────────────────────────────────

    /// Delimiter used for freshly issued tokens.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Empty-payload token under the defaults of `kind`, with a fresh salt.
    fn issue_template(&self, kind: SchemeKind) -> Result<Token> {
        let defaults = match kind {
            SchemeKind::Hashing => self.hashing_defaults.as_ref(),
            SchemeKind::Encryption => self.encryption_defaults.as_ref(),
        };
        let defaults = defaults.ok_or_else(|| {
            error!(
                subsystem = "crypto",
                component = "adaptive_crypt",
                kind = %kind,
                "No default scheme configured"
            );
            Error::UnsupportedScheme(format!("No default {} scheme configured", kind))
        })?;

        Token::template(
            self.delimiter,
            defaults.identifier(),
            defaults.work_factor(),
            generate_salt(defaults.salt_length()),
        )
    }

    /// Capability for a default scheme. A miss means the service was built
    /// inconsistently.
    fn default_service<S: ?Sized>(
        &self,
        registry: &SchemeRegistry<S>,
        scheme: &str,
    ) -> Result<Arc<S>> {
        registry.get(scheme).map_err(|e| {
            error!(
                subsystem = "crypto",
                component = "adaptive_crypt",
                kind = %registry.kind(),
                scheme = %scheme,
                "Default scheme is not registered"
            );
            e
        })
    }

    /// Capability for the scheme embedded in an existing token.
    fn embedded_service<S: ?Sized>(
        &self,
        registry: &SchemeRegistry<S>,
        token: &Token,
        op: &str,
    ) -> Result<Arc<S>> {
        registry.get(token.scheme()).map_err(|e| {
            warn!(
                subsystem = "crypto",
                component = "adaptive_crypt",
                op = %op,
                kind = %registry.kind(),
                scheme = %token.scheme(),
                "Token names an unregistered scheme"
            );
            e
        })
    }
}

impl fmt::Debug for AdaptiveCryptService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveCryptService")
            .field("delimiter", &self.delimiter)
            .field("hashing_defaults", &self.hashing_defaults)
            .field("encryption_defaults", &self.encryption_defaults)
            .field("hashing_schemes", &self.hashing.identifiers())
            .field("encryption_schemes", &self.encryption.identifiers())
            .finish()
    }
}

fn differs_from(defaults: Option<&SchemeDefaults>, token: &Token) -> bool {
    match defaults {
        Some(d) => {
            token.scheme() != d.identifier()
                || token.work_factor() != d.work_factor()
                || token.salt().len() != d.salt_length()
        }
        None => false,
    }
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Builder for [`AdaptiveCryptService`].
///
/// At least one of hashing or encryption must be configured. The default
/// scheme's implementation is registered under the defaults' identifier.
pub struct AdaptiveCryptServiceBuilder {
    delimiter: char,
    hashing: Option<(SchemeDefaults, Arc<dyn HashingService>)>,
    encryption: Option<(SchemeDefaults, Arc<dyn EncryptionService>)>,
}

impl AdaptiveCryptServiceBuilder {
    /// Create a builder with the default `$` delimiter and nothing configured.
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            hashing: None,
            encryption: None,
        }
    }

    /// Set the delimiter for freshly issued tokens.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Configure the default hashing scheme.
    pub fn with_hashing<H: HashingService + 'static>(
        mut self,
        defaults: SchemeDefaults,
        service: H,
    ) -> Self {
        let service: Arc<dyn HashingService> = Arc::new(service);
        self.hashing = Some((defaults, service));
        self
    }

    /// Configure the default encryption scheme.
    pub fn with_encryption<E: EncryptionService + 'static>(
        mut self,
        defaults: SchemeDefaults,
        service: E,
    ) -> Self {
        let service: Arc<dyn EncryptionService> = Arc::new(service);
        self.encryption = Some((defaults, service));
        self
    }

    /// Validate the configuration and build the service.
    pub fn build(self) -> Result<AdaptiveCryptService> {
        validate_delimiter(self.delimiter)?;
        if self.hashing.is_none() && self.encryption.is_none() {
            return Err(Error::InvalidArgument(
                "At least one of hashing or encryption must be configured".to_string(),
            ));
        }

        let hashing = SchemeRegistry::new(SchemeKind::Hashing);
        let hashing_defaults = match self.hashing {
            Some((defaults, service)) => {
                check_defaults(&defaults, self.delimiter)?;
                hashing.register(defaults.identifier(), service)?;
                Some(defaults)
            }
            None => None,
        };

        let encryption = SchemeRegistry::new(SchemeKind::Encryption);
        let encryption_defaults = match self.encryption {
            Some((defaults, service)) => {
                check_defaults(&defaults, self.delimiter)?;
                encryption.register(defaults.identifier(), service)?;
                Some(defaults)
            }
            None => None,
        };

        info!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            delimiter = %self.delimiter,
            hashing_scheme = hashing_defaults.as_ref().map(|d| d.identifier()),
            hashing_work_factor = hashing_defaults.as_ref().map(|d| d.work_factor()),
            encryption_scheme = encryption_defaults.as_ref().map(|d| d.identifier()),
            encryption_work_factor = encryption_defaults.as_ref().map(|d| d.work_factor()),
            "Adaptive crypt service initialized"
        );

        Ok(AdaptiveCryptService {
            delimiter: self.delimiter,
            hashing_defaults,
            encryption_defaults,
            hashing,
            encryption,
        })
    }
}

impl Default for AdaptiveCryptServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_defaults(defaults: &SchemeDefaults, delimiter: char) -> Result<()> {
    defaults.validate()?;
    if defaults.identifier().contains(delimiter) {
        return Err(Error::Format(format!(
            "Default scheme '{}' contains the delimiter '{}'",
            defaults.identifier(),
            delimiter
        )));
    }
    Ok(())
}
