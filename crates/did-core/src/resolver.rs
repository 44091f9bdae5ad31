//! Definition for a DID document resolver and a registry that dispatches resolution to the
//! resolver for a DID's method.
//!
//! See <https://www.w3.org/TR/did-resolution/>

use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::document::DidDocument;
use crate::error::Err;
use crate::uri::DidUri;
use crate::{debugerr, tracerr, Result};

/// Context for a DID resolution result.
pub const RESOLUTION_CONTEXT: &str = "https://w3id.org/did-resolution/v1";

/// Media type of a resolved DID document.
pub const CONTENT_TYPE: &str = "application/did+ld+json";

/// Error codes reported in resolution metadata.
/// See <https://www.w3.org/TR/did-spec-registries/#error>.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionError {
    /// The DID is not syntactically valid for the method, or its embedded data cannot be
    /// decoded.
    InvalidDid,
    /// The public key embedded in or referenced by the DID is malformed.
    InvalidPublicKey,
    /// No resolver is registered for the DID's method.
    MethodNotSupported,
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDid => write!(f, "invalidDid"),
            Self::InvalidPublicKey => write!(f, "invalidPublicKey"),
            Self::MethodNotSupported => write!(f, "methodNotSupported"),
        }
    }
}

/// Metadata associated with a DID resolution response.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    /// The content type of the resolved document. e.g. "application/did+ld+json".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// An error code if the resolution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResolutionError>,
}

/// Metadata associated with a DID document. Static methods such as `did:jwk` carry none.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// If a DID has been deactivated this is `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,
}

/// Return type from a DID document resolution. A resolution is either valid, with a document and
/// no error, or invalid, with an error and no document. Deserialization rejects any other
/// combination.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", try_from = "RawResolution")]
pub struct Resolution {
    #[serde(rename = "@context")]
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    did_document: Option<DidDocument>,
    did_document_metadata: DocumentMetadata,
    did_resolution_metadata: ResolutionMetadata,
}

impl Resolution {
    /// A successful resolution of the document.
    #[must_use]
    pub fn valid(document: DidDocument) -> Self {
        Self {
            context: RESOLUTION_CONTEXT.to_string(),
            did_document: Some(document),
            did_document_metadata: DocumentMetadata::default(),
            did_resolution_metadata: ResolutionMetadata {
                content_type: Some(CONTENT_TYPE.to_string()),
                error: None,
            },
        }
    }

    /// A failed resolution.
    #[must_use]
    pub fn invalid(error: ResolutionError) -> Self {
        Self {
            context: RESOLUTION_CONTEXT.to_string(),
            did_document: None,
            did_document_metadata: DocumentMetadata::default(),
            did_resolution_metadata: ResolutionMetadata {
                content_type: None,
                error: Some(error),
            },
        }
    }

    /// Whether the resolution produced a document.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.did_document.is_some()
    }

    /// The resolved document, if the resolution was valid.
    #[must_use]
    pub const fn document(&self) -> Option<&DidDocument> {
        self.did_document.as_ref()
    }

    /// The resolution error, if the resolution was invalid.
    #[must_use]
    pub const fn error(&self) -> Option<ResolutionError> {
        self.did_resolution_metadata.error
    }

    /// The JSON-LD context of the resolution result.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Metadata associated with the document.
    #[must_use]
    pub const fn document_metadata(&self) -> &DocumentMetadata {
        &self.did_document_metadata
    }

    /// Metadata associated with the response to the resolution request.
    #[must_use]
    pub const fn resolution_metadata(&self) -> &ResolutionMetadata {
        &self.did_resolution_metadata
    }
}

// Unchecked wire form of a resolution.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResolution {
    #[serde(rename = "@context")]
    context: String,
    did_document: Option<DidDocument>,
    #[serde(default)]
    did_document_metadata: DocumentMetadata,
    #[serde(default)]
    did_resolution_metadata: ResolutionMetadata,
}

impl TryFrom<RawResolution> for Resolution {
    type Error = crate::error::Error;

    fn try_from(raw: RawResolution) -> Result<Self> {
        match (raw.did_document.is_some(), raw.did_resolution_metadata.error) {
            (true, None) | (false, Some(_)) => Ok(Self {
                context: raw.context,
                did_document: raw.did_document,
                did_document_metadata: raw.did_document_metadata,
                did_resolution_metadata: raw.did_resolution_metadata,
            }),
            (true, Some(error)) => {
                debugerr!(Err::SerializationError, "resolution has a document and error {}", error)
            }
            (false, None) => {
                debugerr!(Err::SerializationError, "resolution has neither a document nor an error")
            }
        }
    }
}

/// A Resolver is responsible for resolving a DID of a single method to a DID document.
/// Resolution is total: every input produces a [`Resolution`], failures included.
pub trait Resolver: Send + Sync {
    /// The DID method name handled, e.g. `jwk`.
    fn method(&self) -> &str;

    /// Resolve a DID to a DID document.
    fn resolve(&self, did: &str) -> Resolution;
}

type ResolveFn = Box<dyn Fn(&str) -> Resolution + Send + Sync>;

/// Mapping from DID method name to resolver. Each method has at most one resolver.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, ResolveFn>,
}

impl ResolverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolve function for a DID method.
    ///
    /// # Errors
    ///
    /// * `Err::DuplicateMethod` - A resolver is already registered for the method.
    pub fn register<F>(&mut self, method: &str, resolve: F) -> Result<()>
    where
        F: Fn(&str) -> Resolution + Send + Sync + 'static,
    {
        if self.resolvers.contains_key(method) {
            tracerr!(Err::DuplicateMethod, "resolver already registered for did:{}", method);
        }
        tracing::debug!("registered resolver for did:{method}");
        self.resolvers.insert(method.to_string(), Box::new(resolve));
        Ok(())
    }

    /// Register a [`Resolver`] under the method it declares.
    ///
    /// # Errors
    ///
    /// * `Err::DuplicateMethod` - A resolver is already registered for the method.
    pub fn register_resolver<R>(&mut self, resolver: R) -> Result<()>
    where
        R: Resolver + 'static,
    {
        let method = resolver.method().to_string();
        self.register(&method, move |did| resolver.resolve(did))
    }

    /// Whether a resolver is registered for the method.
    #[must_use]
    pub fn supports(&self, method: &str) -> bool {
        self.resolvers.contains_key(method)
    }

    /// Registered method names in sorted order.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Resolve a DID using the resolver registered for its method.
    ///
    /// Unparseable input resolves to `invalidDid` and input for a method without a resolver to
    /// `methodNotSupported`.
    #[must_use]
    pub fn resolve(&self, did: &str) -> Resolution {
        let uri = match DidUri::parse(did) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::debug!("resolution failed: {e}");
                return Resolution::invalid(ResolutionError::InvalidDid);
            }
        };
        let Some(resolve) = self.resolvers.get(&uri.method) else {
            tracing::debug!("no resolver for did:{}", uri.method);
            return Resolution::invalid(ResolutionError::MethodNotSupported);
        };
        resolve(did)
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry").field("methods", &self.methods()).finish()
    }
}
