//! # DID JWK Kit
//!
//! Mint and resolve self-certifying `did:jwk` Decentralized Identifiers.
//!
//! The kit is split into three crates, re-exported here:
//!
//! * [`core`] - DID URIs, DID documents, JWKs, the key manager and signature algorithm traits,
//!   and the method-keyed resolver registry.
//! * [`keyring`] - Ed25519 and secp256k1 signature algorithms and an in-memory key manager.
//! * [`jwk`] - The `did:jwk` method.
//!
//! # Example
//!
//! ```
//! use did_jwk_kit::jwk::DidJwk;
//! use did_jwk_kit::keyring::EphemeralKeyRing;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let keyring = EphemeralKeyRing::new();
//! let did = DidJwk::create_default(&keyring).await.expect("should create");
//!
//! let resolution = did_jwk_kit::resolve(&did.uri);
//! assert_eq!(resolution.document(), Some(&did.document));
//! # }
//! ```

pub use {did_core as core, did_jwk as jwk, keyring};

use std::sync::LazyLock;

use did_core::{Resolution, ResolverRegistry};
use did_jwk::DidJwk;

static REGISTRY: LazyLock<ResolverRegistry> = LazyLock::new(resolver_registry);

/// A resolver registry with every DID method provided by the kit registered.
///
/// Further methods can be registered on the returned registry.
#[must_use]
pub fn resolver_registry() -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    if let Err(e) = registry.register_resolver(DidJwk) {
        // the registry is new so the method cannot be registered already
        tracing::warn!("failed to register did:jwk resolver: {e}");
    }
    registry
}

/// Resolve a DID of any method provided by the kit.
///
/// DIDs of other methods resolve to `methodNotSupported`.
#[must_use]
pub fn resolve(did: &str) -> Resolution {
    REGISTRY.resolve(did)
}
