use did_core::KeyManager;
use did_core::Result;

use crate::{document_from_jwk, BearerDid, CreateOptions, DidJwk, METHOD};

impl DidJwk {
    /// Create a `did:jwk` DID.
    ///
    /// A new private key is generated by the key manager for the configured algorithm. Its
    /// public key is encoded into the DID.
    ///
    /// # Arguments
    ///
    /// * `key_manager` - The key manager that generates and holds the private key.
    /// * `options` - Creation options.
    ///
    /// # Returns
    ///
    /// The DID bound to the key manager and alias of its key, with its DID document.
    ///
    /// # Errors
    ///
    /// * `Err::UnsupportedAlgorithm` - The key manager does not support the algorithm.
    /// * Other errors may be returned by the key manager if it is unable to generate a key.
    pub async fn create<'a, K: KeyManager>(
        key_manager: &'a K, options: &CreateOptions,
    ) -> Result<BearerDid<'a, K>> {
        let alias = key_manager.generate_private_key(options.algorithm).await?;
        let public_key = key_manager.get_public_key(&alias).await?;
        let did = format!("did:{METHOD}:{}", public_key.encode()?);
        tracing::debug!("created {did}");

        Ok(BearerDid {
            document: document_from_jwk(&public_key, &did),
            uri: did,
            alias,
            key_manager,
        })
    }

    /// Create a `did:jwk` DID with an Ed25519 key.
    ///
    /// # Errors
    ///
    /// See [`DidJwk::create`].
    pub async fn create_default<K: KeyManager>(key_manager: &K) -> Result<BearerDid<'_, K>> {
        Self::create(key_manager, &CreateOptions::default()).await
    }
}
