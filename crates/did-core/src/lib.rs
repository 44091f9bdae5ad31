//! # DID Core
//! Types, traits and functions for working with Decentralized Identifiers (DIDs), DID Documents
//! and the keys that back them.

pub(crate) mod document;
pub mod error;
pub(crate) mod keys;
pub(crate) mod resolver;
pub mod test_utils;
pub(crate) mod uri;

pub use document::verification_method::JSON_WEB_KEY_2020;
pub use document::{DidDocument, KeyPurpose, VerificationMethod, DID_CONTEXT, JWS_2020_CONTEXT};
pub use keys::dsa::Dsa;
pub use keys::keyring::KeyManager;
pub use keys::{Algorithm, Curve, Jwk, KeyType, KEY_LENGTH};
pub use resolver::{
    DocumentMetadata, Resolution, ResolutionError, ResolutionMetadata, Resolver,
    ResolverRegistry, CONTENT_TYPE, RESOLUTION_CONTEXT,
};
pub use uri::DidUri;

/// Result type for DID Core.
pub type Result<T, E = error::Error> = core::result::Result<T, E>;
