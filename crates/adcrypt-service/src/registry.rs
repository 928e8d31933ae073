//! Scheme registry mapping identifiers to capability implementations.
//!
//! The map is copy-on-write: readers clone an `Arc` snapshot under a short
//! read lock and call into the capability after releasing it, so a slow
//! key-stretching call never holds the lock. Registration builds a new map
//! and swaps it in under the write lock, so readers only ever see complete
//! maps.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use adcrypt_core::{Error, Result, SchemeKind};
use tracing::{info, warn};

type SchemeMap<S> = HashMap<String, Arc<S>>;

/// Additive-only registry of capabilities of one kind.
pub struct SchemeRegistry<S: ?Sized> {
    kind: SchemeKind,
    services: RwLock<Arc<SchemeMap<S>>>,
}

impl<S: ?Sized> SchemeRegistry<S> {
    /// Create an empty registry.
    pub fn new(kind: SchemeKind) -> Self {
        Self {
            kind,
            services: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Capability family held by this registry.
    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    /// Register `service` under `identifier` (trimmed).
    ///
    /// Returns the normalized identifier. Fails with `InvalidArgument` for a
    /// blank identifier and `DuplicateScheme` if it is already registered.
    /// There is no replace operation.
    pub fn register(&self, identifier: &str, service: Arc<S>) -> Result<String> {
        let identifier = normalize_identifier(self.kind, identifier)?;

        let mut guard = self
            .services
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if guard.contains_key(&identifier) {
            warn!(
                subsystem = "crypto",
                component = "adaptive_crypt",
                op = "register",
                kind = %self.kind,
                scheme = %identifier,
                "Rejected duplicate scheme registration"
            );
            return Err(Error::DuplicateScheme(identifier));
        }

        let mut next: SchemeMap<S> = (**guard).clone();
        next.insert(identifier.clone(), service);
        *guard = Arc::new(next);

        info!(
            subsystem = "crypto",
            component = "adaptive_crypt",
            op = "register",
            kind = %self.kind,
            scheme = %identifier,
            "Registered scheme"
        );
        Ok(identifier)
    }

    /// Look up the capability for `identifier` (exact match).
    pub fn get(&self, identifier: &str) -> Result<Arc<S>> {
        self.snapshot().get(identifier).cloned().ok_or_else(|| {
            Error::UnsupportedScheme(format!(
                "No {} service with the identifier '{}' configured",
                self.kind, identifier
            ))
        })
    }

    /// Check if a capability is registered for `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.snapshot().contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.snapshot().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<SchemeMap<S>> {
        let guard = self.services.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }
}

/// Trim an identifier, rejecting blank ones.
pub fn normalize_identifier(kind: SchemeKind, identifier: &str) -> Result<String> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{} identifier cannot be empty or whitespace",
            kind
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcrypt_core::HashingService;

    struct Fixed(u8);

    impl HashingService for Fixed {
        fn hash(&self, _data: &[u8], _work_factor: u32, _salt: &[u8]) -> Result<Vec<u8>> {
            Ok(vec![self.0])
        }
    }

    fn registry() -> SchemeRegistry<dyn HashingService> {
        SchemeRegistry::new(SchemeKind::Hashing)
    }

    #[test]
    fn test_registry_new_is_empty() {
        let reg = registry();
        assert!(reg.is_empty());
        assert!(reg.identifiers().is_empty());
        assert!(!reg.contains("sha512"));
        assert_eq!(reg.kind(), SchemeKind::Hashing);
    }

    #[test]
    fn test_register_and_lookup() {
        let reg = registry();
        reg.register("sha512", Arc::new(Fixed(1))).unwrap();

        assert!(reg.contains("sha512"));
        assert_eq!(reg.len(), 1);
        let service = reg.get("sha512").unwrap();
        assert_eq!(service.hash(b"", 0, b"").unwrap(), vec![1]);
    }

    #[test]
    fn test_register_trims_identifier() {
        let reg = registry();
        let id = reg.register("  sha1 ", Arc::new(Fixed(1))).unwrap();
        assert_eq!(id, "sha1");
        assert!(reg.contains("sha1"));
        assert!(!reg.contains("  sha1 "));
    }

    #[test]
    fn test_register_blank_identifier_fails() {
        let reg = registry();
        for id in ["", " ", "\t\n"] {
            let err = reg.register(id, Arc::new(Fixed(1))).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn test_register_duplicate_fails_without_overwrite() {
        let reg = registry();
        reg.register("sha1", Arc::new(Fixed(1))).unwrap();

        let err = reg.register(" sha1", Arc::new(Fixed(2))).unwrap_err();
        assert_eq!(err, Error::DuplicateScheme("sha1".to_string()));

        let service = reg.get("sha1").unwrap();
        assert_eq!(service.hash(b"", 0, b"").unwrap(), vec![1]);
    }

    #[test]
    fn test_get_missing_is_unsupported_scheme() {
        let reg = registry();
        let err = reg.get("md5").err().unwrap();
        assert!(err.is_unsupported_scheme());
        assert!(err.to_string().contains("md5"));
        assert!(err.to_string().contains("hashing"));
    }

    #[test]
    fn test_identifiers_sorted() {
        let reg = registry();
        for id in ["sha2", "argon", "sha1"] {
            reg.register(id, Arc::new(Fixed(0))).unwrap();
        }
        assert_eq!(reg.identifiers(), vec!["argon", "sha1", "sha2"]);
    }

    #[test]
    fn test_snapshot_survives_later_registration() {
        let reg = registry();
        reg.register("v1", Arc::new(Fixed(1))).unwrap();
        let before = reg.snapshot();
        reg.register("v2", Arc::new(Fixed(2))).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_concurrent_register_and_lookup() {
        let reg = Arc::new(registry());
        reg.register("base", Arc::new(Fixed(0))).unwrap();

        let writers: Vec<_> = (0..8u8)
            .map(|i| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || {
                    reg.register(&format!("v{}", i), Arc::new(Fixed(i))).unwrap();
                })
            })
            .collect();

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(reg.get("base").is_ok());
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
        assert_eq!(reg.len(), 9);
    }
}
