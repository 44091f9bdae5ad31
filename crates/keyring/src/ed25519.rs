use std::collections::BTreeMap;

use base64ct::{Base64UrlUnpadded, Encoding};
use did_core::error::Err;
use did_core::{tracerr, Algorithm, Curve, Dsa, Jwk, KeyType, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey, PUBLIC_KEY_LENGTH};
use rand::rngs::OsRng;

use crate::{check_family, decode_component, private_component};

/// EdDSA over the Ed25519 curve. Signatures are deterministic and 64 bytes long.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519;

impl Ed25519 {
    fn public_jwk(verifying_key: &VerifyingKey) -> Jwk {
        Jwk {
            alg: Some(Self::ALGORITHM),
            crv: Some(Self::CURVE),
            d: None,
            kid: None,
            kty: Self::KEY_TYPE,
            x: Base64UrlUnpadded::encode_string(verifying_key.as_bytes()),
            y: None,
            extra: BTreeMap::new(),
        }
    }

    fn signing_key(private_key: &Jwk) -> Result<SigningKey> {
        let d = private_component::<Self, { ed25519_dalek::SECRET_KEY_LENGTH }>(private_key)?;
        Ok(SigningKey::from_bytes(&d))
    }

    fn verifying_key(public_key: &Jwk) -> Result<VerifyingKey> {
        check_family::<Self>(public_key, Err::MalformedKey)?;
        let x = decode_component::<PUBLIC_KEY_LENGTH>("x", &public_key.x, Err::MalformedKey)?;
        match VerifyingKey::from_bytes(&x) {
            Ok(vk) => Ok(vk),
            Err(e) => tracerr!(Err::MalformedKey, "x is not an Ed25519 point: {}", e),
        }
    }
}

/// `Dsa` implementation for Ed25519.
impl Dsa for Ed25519 {
    const ALGORITHM: Algorithm = Algorithm::EdDsa;
    const CURVE: Curve = Curve::Ed25519;
    const KEY_TYPE: KeyType = KeyType::Okp;

    fn generate_private_key() -> Result<Jwk> {
        let signing_key = SigningKey::generate(&mut OsRng);
        Ok(Jwk {
            d: Some(Base64UrlUnpadded::encode_string(signing_key.as_bytes())),
            ..Self::public_jwk(&signing_key.verifying_key())
        })
    }

    fn compute_public_key(private_key: &Jwk) -> Result<Jwk> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(Self::public_jwk(&signing_key.verifying_key()))
    }

    fn sign(private_key: &Jwk, payload: &[u8]) -> Result<Vec<u8>> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(signing_key.sign(payload).to_bytes().to_vec())
    }

    fn verify(public_key: &Jwk, payload: &[u8], signature: &[u8]) -> Result<()> {
        let verifying_key = Self::verifying_key(public_key)?;
        let sig = match Signature::from_slice(signature) {
            Ok(sig) => sig,
            Err(e) => tracerr!(Err::SignatureInvalid, "malformed signature: {}", e),
        };
        match verifying_key.verify_strict(payload, &sig) {
            Ok(()) => Ok(()),
            Err(e) => tracerr!(Err::SignatureInvalid, "Error verifying signature: {}", e),
        }
    }

    fn bytes_to_public_key(bytes: &[u8]) -> Result<Jwk> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            tracerr!(
                Err::MalformedKey,
                "invalid public key length. Expected {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            );
        }
        Ok(Jwk {
            alg: Some(Self::ALGORITHM),
            crv: Some(Self::CURVE),
            d: None,
            kid: None,
            kty: Self::KEY_TYPE,
            x: Base64UrlUnpadded::encode_string(bytes),
            y: None,
            extra: BTreeMap::new(),
        })
    }

    fn public_key_to_bytes(public_key: &Jwk) -> Result<Vec<u8>> {
        check_family::<Self>(public_key, Err::MalformedKey)?;
        let x = decode_component::<PUBLIC_KEY_LENGTH>("x", &public_key.x, Err::MalformedKey)?;
        Ok(x.to_vec())
    }
}
