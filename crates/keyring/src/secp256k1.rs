use std::collections::BTreeMap;

use base64ct::{Base64UrlUnpadded, Encoding};
use did_core::error::Err;
use did_core::{tracerr, Algorithm, Curve, Dsa, Jwk, KeyType, Result, KEY_LENGTH};
use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::Secp256k1 as Curve256k1;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::{check_family, decode_component, private_component};

/// Length of an uncompressed SEC1 encoded point: a `0x04` tag followed by both coordinates.
const UNCOMPRESSED_LENGTH: usize = 1 + 2 * KEY_LENGTH;

/// ECDSA over secp256k1 with SHA-256 (`ES256K`). Nonces are derived per RFC 6979 and
/// signatures are 64 bytes of `r || s` with `s` normalized low.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1;

impl Secp256k1 {
    fn public_jwk(verifying_key: &VerifyingKey<Curve256k1>) -> Jwk {
        let point = verifying_key.to_encoded_point(false);
        let bytes = point.as_bytes();
        Jwk {
            alg: Some(Self::ALGORITHM),
            crv: Some(Self::CURVE),
            d: None,
            kid: None,
            kty: Self::KEY_TYPE,
            x: Base64UrlUnpadded::encode_string(&bytes[1..=KEY_LENGTH]),
            y: Some(Base64UrlUnpadded::encode_string(&bytes[KEY_LENGTH + 1..])),
            extra: BTreeMap::new(),
        }
    }

    fn signing_key(private_key: &Jwk) -> Result<SigningKey<Curve256k1>> {
        let d = private_component::<Self, KEY_LENGTH>(private_key)?;
        match SigningKey::from_slice(&d) {
            Ok(sk) => Ok(sk),
            Err(e) => tracerr!(Err::InvalidPrivateKey, "d is not a secp256k1 scalar: {}", e),
        }
    }

    fn verifying_key(public_key: &Jwk) -> Result<VerifyingKey<Curve256k1>> {
        let sec1 = Self::public_key_to_bytes(public_key)?;
        match VerifyingKey::from_sec1_bytes(&sec1) {
            Ok(vk) => Ok(vk),
            Err(e) => tracerr!(Err::MalformedKey, "key is not a secp256k1 point: {}", e),
        }
    }
}

/// `Dsa` implementation for secp256k1.
impl Dsa for Secp256k1 {
    const ALGORITHM: Algorithm = Algorithm::Es256k;
    const CURVE: Curve = Curve::Secp256k1;
    const KEY_TYPE: KeyType = KeyType::Ec;

    fn generate_private_key() -> Result<Jwk> {
        let signing_key = SigningKey::<Curve256k1>::random(&mut OsRng);
        Ok(Jwk {
            d: Some(Base64UrlUnpadded::encode_string(&signing_key.to_bytes())),
            ..Self::public_jwk(signing_key.verifying_key())
        })
    }

    fn compute_public_key(private_key: &Jwk) -> Result<Jwk> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(Self::public_jwk(signing_key.verifying_key()))
    }

    fn sign(private_key: &Jwk, payload: &[u8]) -> Result<Vec<u8>> {
        let signing_key = Self::signing_key(private_key)?;
        let digest = Sha256::digest(payload);
        let sig: Signature<Curve256k1> = match signing_key.sign_prehash(&digest) {
            Ok(sig) => sig,
            Err(e) => tracerr!(Err::InvalidPrivateKey, "failed to sign: {}", e),
        };
        Ok(sig.to_bytes().to_vec())
    }

    fn verify(public_key: &Jwk, payload: &[u8], signature: &[u8]) -> Result<()> {
        let verifying_key = Self::verifying_key(public_key)?;
        let sig = match Signature::<Curve256k1>::from_slice(signature) {
            Ok(sig) => sig,
            Err(e) => tracerr!(Err::SignatureInvalid, "malformed signature: {}", e),
        };
        let digest = Sha256::digest(payload);
        match verifying_key.verify_prehash(&digest, &sig) {
            Ok(()) => Ok(()),
            Err(e) => tracerr!(Err::SignatureInvalid, "Error verifying signature: {}", e),
        }
    }

    fn bytes_to_public_key(bytes: &[u8]) -> Result<Jwk> {
        if bytes.len() != UNCOMPRESSED_LENGTH || bytes[0] != 0x04 {
            tracerr!(
                Err::MalformedKey,
                "expected a {} byte uncompressed SEC1 point, got {} bytes",
                UNCOMPRESSED_LENGTH,
                bytes.len()
            );
        }
        Ok(Jwk {
            alg: Some(Self::ALGORITHM),
            crv: Some(Self::CURVE),
            d: None,
            kid: None,
            kty: Self::KEY_TYPE,
            x: Base64UrlUnpadded::encode_string(&bytes[1..=KEY_LENGTH]),
            y: Some(Base64UrlUnpadded::encode_string(&bytes[KEY_LENGTH + 1..])),
            extra: BTreeMap::new(),
        })
    }

    fn public_key_to_bytes(public_key: &Jwk) -> Result<Vec<u8>> {
        check_family::<Self>(public_key, Err::MalformedKey)?;
        let Some(y) = &public_key.y else {
            tracerr!(Err::MalformedKey, "missing y coordinate");
        };
        let x = decode_component::<KEY_LENGTH>("x", &public_key.x, Err::MalformedKey)?;
        let y = decode_component::<KEY_LENGTH>("y", y, Err::MalformedKey)?;
        Ok([&[0x04][..], &x, &y].concat())
    }
}
