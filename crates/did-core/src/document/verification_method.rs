//! Verification methods allow public keys to be associated with a DID.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::keys::Jwk;

/// Verification method type for a public key expressed as a JWK.
pub const JSON_WEB_KEY_2020: &str = "JsonWebKey2020";

/// A DID document can express verification methods, such as cryptographic public keys, which can be
/// used to authenticate or authorize interactions with the DID subject or associated parties.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationMethod {
    /// Identifier for the verification method. A DID URL.
    pub id: String,
    /// The type of verification method. One that is registered in a DID specification registry.
    /// <https://www.w3.org/TR/did-spec-registries/>
    #[serde(rename = "type")]
    pub type_: String,
    /// Identifier for the controller of the verification method. A DID.
    pub controller: String,
    /// The public key material of the verification method, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,
}

/// Key purpose type.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyPurpose {
    #[default]
    /// The authentication verification relationship is used to specify how the DID subject is
    /// expected to be authenticated, for purposes such as logging into a website or engaging in
    /// any sort of challenge-response protocol.
    Authentication,
    /// The assertionMethod verification relationship is used to specify how the DID subject is
    /// expected to express claims, such as for the purposes of issuing a Verifiable Credential
    AssertionMethod,
    /// The capabilityInvocation verification relationship is used to specify a verification method
    /// that might be used by the DID subject to invoke a cryptographic capability, such as the
    /// authorization to update the DID Document.
    CapabilityInvocation,
    /// The capabilityDelegation verification relationship is used to specify a mechanism that might
    /// be used by the DID subject to delegate a cryptographic capability to another party.
    CapabilityDelegation,
}

impl KeyPurpose {
    /// Every verification relationship.
    pub const ALL: [Self; 4] = [
        Self::Authentication,
        Self::AssertionMethod,
        Self::CapabilityInvocation,
        Self::CapabilityDelegation,
    ];
}

impl Display for KeyPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::AssertionMethod => write!(f, "assertionMethod"),
            Self::CapabilityInvocation => write!(f, "capabilityInvocation"),
            Self::CapabilityDelegation => write!(f, "capabilityDelegation"),
        }
    }
}
