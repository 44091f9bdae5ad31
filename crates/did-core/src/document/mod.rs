//! # DID Document
//!
//! The resolved identity record for a DID: its verification methods and the verification
//! relationships that refer to them.
//!
//! See <https://www.w3.org/TR/did-core/#core-properties>

use serde::{Deserialize, Serialize};

pub mod verification_method;

pub use verification_method::{KeyPurpose, VerificationMethod};

/// The default context for a DID document. <https://www.w3.org/TR/did-core/#context>
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// Context defining the `JsonWebKey2020` verification method type.
pub const JWS_2020_CONTEXT: &str = "https://w3id.org/security/suites/jws-2020/v1";

/// DID Document.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DidDocument {
    /// JSON-LD context.
    #[serde(rename = "@context", skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,

    /// The DID the document describes.
    pub id: String,

    /// Verification methods, such as cryptographic public keys, that can be used to
    /// authenticate or authorize interactions with the DID subject.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verification_method: Vec<VerificationMethod>,

    /// Ids of the verification methods used to authenticate the DID subject.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<String>,

    /// Ids of the verification methods used to express claims, such as issuing credentials.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assertion_method: Vec<String>,

    /// Ids of the verification methods used to invoke a cryptographic capability.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capability_invocation: Vec<String>,

    /// Ids of the verification methods used to delegate a cryptographic capability.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capability_delegation: Vec<String>,
}

impl DidDocument {
    /// Ids of the verification methods for a verification relationship.
    #[must_use]
    pub fn relationship(&self, purpose: KeyPurpose) -> &[String] {
        match purpose {
            KeyPurpose::Authentication => &self.authentication,
            KeyPurpose::AssertionMethod => &self.assertion_method,
            KeyPurpose::CapabilityInvocation => &self.capability_invocation,
            KeyPurpose::CapabilityDelegation => &self.capability_delegation,
        }
    }

    /// Add a verification method to the document and reference it from each of the
    /// relationships given.
    pub fn add_verification_method(&mut self, vm: VerificationMethod, purposes: &[KeyPurpose]) {
        for purpose in purposes {
            let ids = match purpose {
                KeyPurpose::Authentication => &mut self.authentication,
                KeyPurpose::AssertionMethod => &mut self.assertion_method,
                KeyPurpose::CapabilityInvocation => &mut self.capability_invocation,
                KeyPurpose::CapabilityDelegation => &mut self.capability_delegation,
            };
            if !ids.contains(&vm.id) {
                ids.push(vm.id.clone());
            }
        }
        self.verification_method.push(vm);
    }

    /// Find the first verification method referenced by the relationship.
    #[must_use]
    pub fn verification_method_for(&self, purpose: KeyPurpose) -> Option<&VerificationMethod> {
        let ids = self.relationship(purpose);
        self.verification_method.iter().find(|vm| ids.contains(&vm.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_verification_method() {
        let mut doc = DidDocument {
            id: "did:example:123".to_string(),
            ..DidDocument::default()
        };
        let vm = VerificationMethod {
            id: "did:example:123#0".to_string(),
            controller: "did:example:123".to_string(),
            type_: "JsonWebKey2020".to_string(),
            ..VerificationMethod::default()
        };
        doc.add_verification_method(
            vm.clone(),
            &[KeyPurpose::Authentication, KeyPurpose::Authentication, KeyPurpose::AssertionMethod],
        );

        assert_eq!(doc.authentication, vec!["did:example:123#0".to_string()]);
        assert_eq!(doc.assertion_method, vec!["did:example:123#0".to_string()]);
        assert!(doc.capability_invocation.is_empty());
        assert_eq!(doc.verification_method_for(KeyPurpose::Authentication), Some(&vm));
        assert_eq!(doc.verification_method_for(KeyPurpose::CapabilityDelegation), None);

        let json = serde_json::to_value(&doc).expect("should serialize");
        assert!(json.get("capabilityInvocation").is_none());
        assert!(json.get("@context").is_none());
        assert_eq!(json["verificationMethod"][0]["type"], "JsonWebKey2020");
    }
}
