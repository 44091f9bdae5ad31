use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use did_core::error::Err;
use did_core::{tracerr, Algorithm, Jwk, KeyManager, Result};

use crate::crypto;

type KeyStore = HashMap<String, Jwk>;

/// Ephemeral key ring. Private keys are held in memory, keyed by alias, for as long as any clone
/// of the key ring exists. The alias of a key is the JWK thumbprint of its public key.
#[derive(Clone)]
pub struct EphemeralKeyRing {
    keys: Arc<Mutex<KeyStore>>,
    algorithms: Vec<Algorithm>,
}

/// Default
impl Default for EphemeralKeyRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists aliases only. Private keys are never formatted.
impl fmt::Debug for EphemeralKeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut aliases: Vec<String> = match self.keys.lock() {
            Ok(keys) => keys.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        aliases.sort_unstable();
        f.debug_struct("EphemeralKeyRing")
            .field("aliases", &aliases)
            .field("algorithms", &self.algorithms)
            .finish()
    }
}

/// Configuration and key storage.
impl EphemeralKeyRing {
    /// Create a new `EphemeralKeyRing` that supports every algorithm.
    #[must_use]
    pub fn new() -> Self {
        Self::with_algorithms(&Algorithm::ALL)
    }

    /// Create a new `EphemeralKeyRing` that only generates and imports keys for the
    /// given algorithms.
    #[must_use]
    pub fn with_algorithms(algorithms: &[Algorithm]) -> Self {
        Self {
            keys: Arc::new(Mutex::new(HashMap::new())),
            algorithms: algorithms.to_vec(),
        }
    }

    /// Algorithms this key ring will generate and import keys for.
    #[must_use]
    pub fn supported_algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Number of keys held.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidConfig` - The key store lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Whether the key ring holds no keys.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidConfig` - The key store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, KeyStore>> {
        match self.keys.lock() {
            Ok(guard) => Ok(guard),
            Err(_) => tracerr!(Err::InvalidConfig, "lock on key store mutex failed"),
        }
    }

    fn check_supported(&self, alg: Algorithm) -> Result<()> {
        if !self.algorithms.contains(&alg) {
            tracerr!(Err::UnsupportedAlgorithm, "key ring does not support {}", alg);
        }
        Ok(())
    }

    fn store(&self, private_key: Jwk, public_key: &Jwk) -> Result<String> {
        let alias = public_key.thumbprint()?;
        self.lock()?.insert(alias.clone(), private_key);
        Ok(alias)
    }

    // The lock is released before the key is used.
    fn private_key(&self, alias: &str) -> Result<Jwk> {
        let Some(key) = self.lock()?.get(alias).cloned() else {
            tracerr!(Err::UnknownAlias, "no key for alias {}", alias);
        };
        Ok(key)
    }
}

/// `KeyManager` implementation
impl KeyManager for EphemeralKeyRing {
    async fn generate_private_key(&self, alg: Algorithm) -> Result<String> {
        self.check_supported(alg)?;
        let private_key = crypto::generate_private_key(alg)?;
        let public_key = crypto::compute_public_key(&private_key)?;
        let alias = self.store(private_key, &public_key)?;
        tracing::debug!("generated {alg} key {alias}");
        Ok(alias)
    }

    async fn get_public_key(&self, alias: &str) -> Result<Jwk> {
        crypto::compute_public_key(&self.private_key(alias)?)
    }

    async fn sign(&self, alias: &str, payload: &[u8]) -> Result<Vec<u8>> {
        crypto::sign(&self.private_key(alias)?, payload)
    }

    async fn import_private_key(&self, private_key: Jwk) -> Result<String> {
        if !private_key.is_private() {
            tracerr!(Err::InvalidPrivateKey, "key has no private component");
        }
        let public_key = crypto::compute_public_key(&private_key)?;
        self.check_supported(public_key.check()?)?;
        let alias = self.store(private_key, &public_key)?;
        tracing::debug!("imported key {alias}");
        Ok(alias)
    }

    async fn delete_key(&self, alias: &str) -> Result<()> {
        if self.lock()?.remove(alias).is_none() {
            tracerr!(Err::UnknownAlias, "no key for alias {}", alias);
        }
        tracing::debug!("deleted key {alias}");
        Ok(())
    }
}
