//! # DID Core Errors
//!
//! This module defines the error types used by the DID Core library, including for traits that
//! may be implemented in other crates.

use std::fmt::Display;

use thiserror::Error;

/// Log an error with `tracing` and return it, decorated with a formatted context message.
///
/// # Example
/// ```
/// use did_core::error::Err;
/// use did_core::{tracerr, Result};
///
/// fn with_msg() -> Result<()> {
///     tracerr!(Err::MalformedKey, "message: {}", "some message")
/// }
///
/// fn no_msg() -> Result<()> {
///     tracerr!(Err::MalformedKey)
/// }
/// ```
#[macro_export]
macro_rules! tracerr {
    // with context
    ($code:expr, $($msg:tt)*) => {
        {
        use $crate::error::Context as _;
        tracing::error!($($msg)*);
        return Err($code).context(format!($($msg)*));
        }
    };
    // no context
    ($code:expr) => {
        {
        tracing::error!("{}", $code);
        return Err($code.into());
        }
    }
}

/// As [`tracerr!`] but logged at debug level. Used where the error describes rejected external
/// input rather than a fault.
///
/// # Example
/// ```
/// use did_core::error::Err;
/// use did_core::{debugerr, Result};
///
/// fn reject(did: &str) -> Result<()> {
///     debugerr!(Err::InvalidDid, "not a valid DID: {}", did)
/// }
/// ```
#[macro_export]
macro_rules! debugerr {
    ($code:expr, $($msg:tt)*) => {
        {
        use $crate::error::Context as _;
        tracing::debug!($($msg)*);
        return Err($code).context(format!($($msg)*));
        }
    };
}

/// Public error type for DID Core.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] anyhow::Error);

impl Error {
    /// Transfer the error to a JSON object with a machine-readable code and a description.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.0.root_cause().to_string(),
            "error_description": self.to_string(),
        })
    }

    /// Returns true if `err` is the code held by this error object.
    #[must_use]
    pub fn is(&self, err: Err) -> bool {
        self.code() == Some(err)
    }

    /// The typed code for this error, if one was attached when the error was raised.
    #[must_use]
    pub fn code(&self) -> Option<Err> {
        self.0.downcast_ref::<Err>().copied()
    }
}

/// Typed errors for DID Core.
#[derive(Clone, Copy, Error, Debug, PartialEq, Eq)]
pub enum Err {
    /// The string is not a syntactically valid DID, or is a DID of the wrong method.
    #[error("invalid_did")]
    InvalidDid,

    /// A JWK could not be decoded or its members are inconsistent with its declared key type and
    /// curve.
    #[error("malformed_key")]
    MalformedKey,

    /// The private key component is missing or has the wrong length or format for the
    /// algorithm.
    #[error("invalid_private_key")]
    InvalidPrivateKey,

    /// A requested key signing algorithm is not supported by the key manager or is unknown.
    #[error("unsupported_algorithm")]
    UnsupportedAlgorithm,

    /// The key manager holds no key under the requested alias.
    #[error("unknown_alias")]
    UnknownAlias,

    /// The signature does not validate for the payload and public key.
    #[error("signature_invalid")]
    SignatureInvalid,

    /// A resolver is already registered for the DID method.
    #[error("duplicate_method")]
    DuplicateMethod,

    /// An error occurred trying to serialize data.
    #[error("serialization_error")]
    SerializationError,

    /// Internal state or configuration could not be used.
    #[error("invalid_config")]
    InvalidConfig,
}

/// Context is used to decorate errors with useful context information.
pub trait Context<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Adds context to the error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context to add to the error.
    ///
    /// # Returns
    ///
    /// Original return object or error with context appended.
    ///
    /// # Errors
    ///
    /// * Original error with context appended.
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E> Context<T, E> for core::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(Error(anyhow::Error::from(e).context(context))),
        }
    }
}

impl From<Err> for Error {
    fn from(error: Err) -> Self {
        Self(error.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self(anyhow::Error::from(err).context(Err::SerializationError))
    }
}
