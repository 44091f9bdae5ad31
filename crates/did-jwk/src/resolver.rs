use did_core::error::Err;
use did_core::{
    debugerr, DidDocument, DidUri, Jwk, Resolution, ResolutionError, Resolver, Result,
};

use crate::{document_from_jwk, DidJwk, METHOD};

impl DidJwk {
    /// Resolve a `did:jwk` DID.
    ///
    /// Resolution is offline and deterministic: resolving the same DID always yields the same
    /// document. Any input that is not a `did:jwk` DID embedding a valid public key resolves to an
    /// invalid [`Resolution`].
    ///
    /// # Returns
    ///
    /// The DID document with a single verification method for the key encoded in the DID,
    /// referenced by the authentication, assertion, capability invocation and capability
    /// delegation relationships.
    #[must_use]
    pub fn resolve(did: &str) -> Resolution {
        match Self::read(did) {
            Ok(doc) => Resolution::valid(doc),
            Err(e) => {
                tracing::debug!("did:jwk resolution failed: {e}");
                if e.is(Err::MalformedKey) {
                    Resolution::invalid(ResolutionError::InvalidPublicKey)
                } else {
                    Resolution::invalid(ResolutionError::InvalidDid)
                }
            }
        }
    }

    fn read(did: &str) -> Result<DidDocument> {
        let uri = DidUri::parse(did)?;
        if uri.method != METHOD {
            debugerr!(Err::InvalidDid, "DID is not a valid did:jwk: {}", did);
        }
        // the method-specific identifier is the encoded key
        let key = Jwk::decode(&uri.id)?;
        Ok(document_from_jwk(&key, &uri.did()))
    }
}

/// Resolver implementation for the JWK method.
impl Resolver for DidJwk {
    fn method(&self) -> &str {
        METHOD
    }

    fn resolve(&self, did: &str) -> Resolution {
        Self::resolve(did)
    }
}

#[cfg(test)]
mod tests {
    use base64ct::{Base64UrlUnpadded, Encoding};
    use did_core::test_utils::{ED25519_PUBLIC, SECP256K1_X, SECP256K1_Y};
    use did_core::{Algorithm, KeyPurpose, JSON_WEB_KEY_2020};
    use insta::assert_json_snapshot as assert_snapshot;

    use super::*;

    const DID: &str = "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ";

    fn did_for(json: &str) -> String {
        format!("did:jwk:{}", Base64UrlUnpadded::encode_string(json.as_bytes()))
    }

    #[test]
    fn resolve_ed25519() {
        let resolution = DidJwk::resolve(DID);
        assert!(resolution.is_valid());
        let doc = resolution.document().expect("should have document");
        assert_eq!(doc.id, DID);
        assert_eq!(doc.verification_method.len(), 1);

        let vm = &doc.verification_method[0];
        let kid = format!("{DID}#0");
        assert_eq!(vm.id, kid);
        assert_eq!(vm.type_, JSON_WEB_KEY_2020);
        assert_eq!(vm.controller, DID);
        let jwk = vm.public_key_jwk.as_ref().expect("should have key");
        assert_eq!(jwk.x, ED25519_PUBLIC);
        assert_eq!(jwk.infer_algorithm().expect("should infer"), Algorithm::EdDsa);

        for purpose in KeyPurpose::ALL {
            assert_eq!(doc.relationship(purpose), &[kid.clone()], "{purpose}");
        }
    }

    #[test]
    fn resolved_document() {
        assert_snapshot!(DidJwk::resolve(DID), @r###"
        {
          "@context": "https://w3id.org/did-resolution/v1",
          "didDocument": {
            "@context": [
              "https://www.w3.org/ns/did/v1",
              "https://w3id.org/security/suites/jws-2020/v1"
            ],
            "id": "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ",
            "verificationMethod": [
              {
                "id": "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ#0",
                "type": "JsonWebKey2020",
                "controller": "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ",
                "publicKeyJwk": {
                  "crv": "Ed25519",
                  "kty": "OKP",
                  "x": "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"
                }
              }
            ],
            "authentication": [
              "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ#0"
            ],
            "assertionMethod": [
              "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ#0"
            ],
            "capabilityInvocation": [
              "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ#0"
            ],
            "capabilityDelegation": [
              "did:jwk:eyJrdHkiOiJPS1AiLCJjcnYiOiJFZDI1NTE5IiwieCI6IjExcVlBWUt4Q3JmVlNfN1R5V1FIT2c3aGN2UGFwaU1scndJYWFQY0hVUm8ifQ#0"
            ]
          },
          "didDocumentMetadata": {},
          "didResolutionMetadata": {
            "contentType": "application/did+ld+json"
          }
        }
        "###);
    }

    #[test]
    fn resolve_secp256k1() {
        let did = did_for(&format!(
            r#"{{"kty":"EC","crv":"secp256k1","x":"{SECP256K1_X}","y":"{SECP256K1_Y}"}}"#
        ));
        let resolution = DidJwk::resolve(&did);
        let doc = resolution.document().expect("should resolve");
        let jwk = doc.verification_method[0].public_key_jwk.as_ref().expect("should have key");
        assert_eq!(jwk.y.as_deref(), Some(SECP256K1_Y));
    }

    #[test]
    fn resolve_is_idempotent() {
        let first = serde_json::to_vec(&DidJwk::resolve(DID)).expect("should serialize");
        for _ in 0..3 {
            assert_eq!(serde_json::to_vec(&DidJwk::resolve(DID)).expect("should serialize"), first);
        }
    }

    #[test]
    fn resolve_strips_private_component() {
        let did = did_for(&format!(
            r#"{{"kty":"OKP","crv":"Ed25519","x":"{ED25519_PUBLIC}","d":"{ED25519_PUBLIC}"}}"#
        ));
        let resolution = DidJwk::resolve(&did);
        let doc = resolution.document().expect("should resolve");
        let jwk = doc.verification_method[0].public_key_jwk.as_ref().expect("should have key");
        assert!(!jwk.is_private());
    }

    #[test]
    fn resolve_keeps_other_members() {
        let did = did_for(&format!(
            r#"{{"kty":"OKP","crv":"Ed25519","x":"{ED25519_PUBLIC}","use":"sig","key_ops":["verify"]}}"#
        ));
        let resolution = DidJwk::resolve(&did);
        let doc = resolution.document().expect("should resolve");
        let jwk = doc.verification_method[0].public_key_jwk.as_ref().expect("should have key");
        assert_eq!(jwk.extra["use"], "sig");
        assert_eq!(jwk.extra["key_ops"], serde_json::json!(["verify"]));

        let json = serde_json::to_value(jwk).expect("should serialize");
        assert_eq!(json["use"], "sig");
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn resolve_wrong_method() {
        let resolution = DidJwk::resolve("did:example:123");
        assert!(!resolution.is_valid());
        assert!(resolution.document().is_none());
        assert_eq!(resolution.error(), Some(ResolutionError::InvalidDid));
    }

    #[test]
    fn resolve_invalid_input() {
        for did in [
            "",
            "did:jwk",
            "did:jwk:",
            "did:jwk:not-valid-base64!!!",
            "did:jwk:AAAA",
            "not a did at all",
        ] {
            let resolution = DidJwk::resolve(did);
            assert!(!resolution.is_valid(), "{did}");
            assert!(resolution.document().is_none(), "{did}");
        }
    }

    #[test]
    fn resolve_invalid_key() {
        for json in [
            r#"{"kty":"bogus"}"#,
            r#"{"kty":"OKP"}"#,
            r#"{"kty":"OKP","crv":"Ed25519","x":"AAAA"}"#,
            r#"{"kty":"EC","crv":"secp256k1","x":"11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"}"#,
            "[]",
            "null",
        ] {
            let resolution = DidJwk::resolve(&did_for(json));
            assert_eq!(resolution.error(), Some(ResolutionError::InvalidPublicKey), "{json}");
            assert!(resolution.document().is_none());
        }
    }

    #[test]
    fn resolver_trait() {
        let resolver = DidJwk;
        assert_eq!(Resolver::method(&resolver), "jwk");
        assert_eq!(Resolver::resolve(&resolver, DID), DidJwk::resolve(DID));
    }
}
