//! Key management. This module provides a trait that can be implemented for generating and
//! storing private keys and signing with them, without handing private key material to callers.

use crate::keys::{Algorithm, Jwk};
use crate::Result;

/// Key generation and storage provider. Keys are referred to by an opaque alias returned when the
/// key is generated or imported. The `self` reference allows for configuration information such
/// as key store location and credentials.
#[allow(async_fn_in_trait)]
pub trait KeyManager {
    /// Generate a new private key for the specified algorithm and store it.
    ///
    /// # Arguments
    ///
    /// * `alg` - The signature algorithm the key is for.
    ///
    /// # Returns
    ///
    /// The alias under which the key is stored.
    ///
    /// # Errors
    ///
    /// * `Err::UnsupportedAlgorithm` - The key manager does not support the algorithm.
    async fn generate_private_key(&self, alg: Algorithm) -> Result<String>;

    /// Get the public key for a stored private key.
    ///
    /// # Errors
    ///
    /// * `Err::UnknownAlias` - No key is stored under the alias.
    async fn get_public_key(&self, alias: &str) -> Result<Jwk>;

    /// Sign a payload with the key stored under the alias.
    ///
    /// # Returns
    ///
    /// The raw signature bytes as produced by the key's signature algorithm.
    ///
    /// # Errors
    ///
    /// * `Err::UnknownAlias` - No key is stored under the alias.
    async fn sign(&self, alias: &str, payload: &[u8]) -> Result<Vec<u8>>;

    /// Store an externally generated private key.
    ///
    /// # Returns
    ///
    /// The alias under which the key is stored.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPrivateKey` - The JWK does not carry a usable private key.
    /// * `Err::UnsupportedAlgorithm` - The key manager does not support the key's algorithm.
    async fn import_private_key(&self, private_key: Jwk) -> Result<String>;

    /// Remove the key stored under the alias. Later use of the alias fails with
    /// `Err::UnknownAlias`.
    ///
    /// # Errors
    ///
    /// * `Err::UnknownAlias` - No key is stored under the alias.
    async fn delete_key(&self, alias: &str) -> Result<()>;
}
