//! Tests for creating `did:jwk` DIDs and resolving them back to their keys.

use base64ct::{Base64UrlUnpadded, Encoding};
use did_jwk_kit::core::{Algorithm, KeyManager, KeyPurpose, ResolutionError};
use did_jwk_kit::jwk::{CreateOptions, DidJwk};
use did_jwk_kit::keyring::{crypto, EphemeralKeyRing};

// Every created DID resolves to a document holding the key manager's public key for the DID's
// alias, and signatures made through the DID verify against that key.
#[tokio::test]
async fn create_then_resolve() {
    let keyring = EphemeralKeyRing::new();

    for algorithm in Algorithm::ALL {
        let did = DidJwk::create(&keyring, &CreateOptions { algorithm })
            .await
            .expect("should create");
        let expected = keyring.get_public_key(&did.alias).await.expect("should get key");

        let resolution = did_jwk_kit::resolve(&did.uri);
        assert!(resolution.is_valid(), "{algorithm}");
        let doc = resolution.document().expect("should have document");
        assert_eq!(doc, &did.document);
        assert_eq!(doc.verification_method.len(), 1);

        let vm = &doc.verification_method[0];
        assert_eq!(vm.id, did.key_id());
        assert_eq!(vm.public_key_jwk.as_ref(), Some(&expected));
        for purpose in KeyPurpose::ALL {
            assert_eq!(doc.relationship(purpose), &[vm.id.clone()]);
        }

        let sig = did.sign(b"test payload").await.expect("should sign");
        crypto::verify(&expected, b"test payload", &sig).expect("should verify");
        crypto::verify(&expected, b"other payload", &sig).expect_err("should not verify");
    }
}

// A DID for an imported key is the same whichever key manager holds it.
#[tokio::test]
async fn imported_key_is_stable() {
    let private = crypto::generate_private_key(Algorithm::EdDsa).expect("should generate");
    let first = EphemeralKeyRing::new();
    let second = EphemeralKeyRing::new();

    let alias1 = first.import_private_key(private.clone()).await.expect("should import");
    let alias2 = second.import_private_key(private).await.expect("should import");
    assert_eq!(alias1, alias2);

    let key1 = first.get_public_key(&alias1).await.expect("should get key");
    let key2 = second.get_public_key(&alias2).await.expect("should get key");
    assert_eq!(key1.encode().expect("should encode"), key2.encode().expect("should encode"));
}

// Resolution never panics and reports what was wrong with the input.
#[test]
fn malformed_input() {
    let encode =
        |json: &str| format!("did:jwk:{}", Base64UrlUnpadded::encode_string(json.as_bytes()));

    let cases = [
        ("".to_string(), ResolutionError::InvalidDid),
        ("did:jwk:".to_string(), ResolutionError::InvalidDid),
        ("did:jwk:not-valid-base64!!!".to_string(), ResolutionError::InvalidDid),
        ("did:example:123".to_string(), ResolutionError::MethodNotSupported),
        (encode("not json"), ResolutionError::InvalidPublicKey),
        (encode(r#"{"kty":"bogus"}"#), ResolutionError::InvalidPublicKey),
        (encode(r#"{"kty":"OKP","crv":"Ed25519","x":"AAAA"}"#), ResolutionError::InvalidPublicKey),
    ];
    for (did, expected) in cases {
        let resolution = did_jwk_kit::resolve(&did);
        assert!(!resolution.is_valid(), "{did}");
        assert!(resolution.document().is_none(), "{did}");
        assert_eq!(resolution.error(), Some(expected), "{did}");
    }
}

// Resolving the same DID twice yields byte-identical results.
#[tokio::test]
async fn resolution_is_deterministic() {
    let keyring = EphemeralKeyRing::new();
    let did = DidJwk::create_default(&keyring).await.expect("should create");

    let first = serde_json::to_string(&did_jwk_kit::resolve(&did.uri)).expect("should serialize");
    let second = serde_json::to_string(&DidJwk::resolve(&did.uri)).expect("should serialize");
    assert_eq!(first, second);
}
