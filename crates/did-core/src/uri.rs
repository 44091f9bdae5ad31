//! Destructure DID URIs into their components.
//!
//! A DID URI is of the form
//!
//! `did:<method>:<method-specific-id>[/<path>][?<query>][#<fragment>]`.
//!
//! See <https://www.w3.org/TR/did-core/#did-syntax>

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Err;
use crate::{debugerr, Result};

static DID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "^did:(?<method>[a-z0-9]+):",
        "(?<id>(?:(?:[A-Za-z0-9._-]|%[0-9A-Fa-f]{2})*:)*(?:[A-Za-z0-9._-]|%[0-9A-Fa-f]{2})+)",
        "(?<path>/[^?#]*)?",
        r"(?:\?(?<query>[^#]*))?",
        "(?:#(?<fragment>.*))?$",
    ))
    .expect("should compile")
});

/// Structure of a parsed DID URI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidUri {
    /// The original string.
    pub uri: String,

    /// DID method name.
    pub method: String,

    /// Method-specific identifier. Its meaning is defined by the method.
    pub id: String,

    /// Path, including the leading `/`.
    pub path: Option<String>,

    /// Query, without the leading `?`.
    pub query: Option<String>,

    /// Fragment, without the leading `#`.
    pub fragment: Option<String>,
}

impl DidUri {
    /// Parse a string into a DID URI.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidDid` - The string does not follow DID syntax.
    pub fn parse(uri: &str) -> Result<Self> {
        let Some(caps) = DID_REGEX.captures(uri) else {
            debugerr!(Err::InvalidDid, "not a valid DID: {}", uri);
        };
        let part = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Ok(Self {
            uri: uri.to_string(),
            method: caps["method"].to_string(),
            id: caps["id"].to_string(),
            path: part("path"),
            query: part("query"),
            fragment: part("fragment"),
        })
    }

    /// The DID without any path, query or fragment.
    #[must_use]
    pub fn did(&self) -> String {
        format!("did:{}:{}", self.method, self.id)
    }
}

impl FromStr for DidUri {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for DidUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}
