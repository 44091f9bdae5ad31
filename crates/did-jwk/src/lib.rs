//! # DID JWK Implementation
//!
//! The `did:jwk` method embeds a public key, expressed as a JWK, directly in the DID. Resolution
//! is performed offline by decoding the key and expanding it into a DID document with a single
//! verification method.
//!
//! See <https://github.com/quartzjer/did-jwk/blob/main/spec.md>

/// DID JWK registrar. Implementation of the Create operation.
pub mod registrar;
/// DID JWK resolver. Implementation of the DID Read operation.
pub mod resolver;

use std::fmt;

use did_core::{
    Algorithm, DidDocument, Jwk, KeyManager, KeyPurpose, Result, VerificationMethod, DID_CONTEXT,
    JSON_WEB_KEY_2020, JWS_2020_CONTEXT,
};
use serde::{Deserialize, Serialize};

/// The DID method name.
pub const METHOD: &str = "jwk";

/// Receiver for the `did:jwk` method operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct DidJwk;

/// Options for creating a `did:jwk` DID.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOptions {
    /// Signature algorithm of the generated key.
    pub algorithm: Algorithm,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::EdDsa,
        }
    }
}

/// A DID together with the key manager holding its private key. Signing requires the key
/// manager; the DID itself stays resolvable without it.
pub struct BearerDid<'a, K: KeyManager> {
    /// The DID.
    pub uri: String,
    /// Alias of the DID's private key in the key manager.
    pub alias: String,
    /// The DID document the DID resolves to.
    pub document: DidDocument,
    key_manager: &'a K,
}

/// The key manager is not formatted.
impl<K: KeyManager> fmt::Debug for BearerDid<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerDid")
            .field("uri", &self.uri)
            .field("alias", &self.alias)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl<K: KeyManager> BearerDid<'_, K> {
    /// Id of the DID's single verification method.
    #[must_use]
    pub fn key_id(&self) -> String {
        format!("{}#0", self.uri)
    }

    /// The public key embedded in the DID.
    ///
    /// # Errors
    ///
    /// * `Err::UnknownAlias` - The key manager no longer holds the key.
    pub async fn public_key(&self) -> Result<Jwk> {
        self.key_manager.get_public_key(&self.alias).await
    }

    /// Sign a payload with the DID's private key.
    ///
    /// # Errors
    ///
    /// * `Err::UnknownAlias` - The key manager no longer holds the key.
    pub async fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
        self.key_manager.sign(&self.alias, payload).await
    }
}

// Expand a public JWK into the DID document for `did`. did:jwk documents always have exactly one
// verification method, referenced by every relationship.
pub(crate) fn document_from_jwk(key: &Jwk, did: &str) -> DidDocument {
    let mut doc = DidDocument {
        context: vec![DID_CONTEXT.to_string(), JWS_2020_CONTEXT.to_string()],
        id: did.to_string(),
        ..DidDocument::default()
    };
    let vm = VerificationMethod {
        id: format!("{did}#0"),
        type_: JSON_WEB_KEY_2020.to_string(),
        controller: did.to_string(),
        public_key_jwk: Some(key.to_public()),
    };
    doc.add_verification_method(vm, &KeyPurpose::ALL);
    doc
}
