//! Algorithm-agnostic key operations. Each function selects the [`Dsa`] implementation for an
//! algorithm tag, or for the algorithm implied by a key, and delegates to it.

use did_core::error::Err;
use did_core::{tracerr, Algorithm, Dsa, Jwk, Result};

use crate::{Ed25519, Secp256k1};

/// Generate a new private key for the algorithm.
///
/// # Errors
///
/// An error is returned if the key could not be generated.
pub fn generate_private_key(alg: Algorithm) -> Result<Jwk> {
    match alg {
        Algorithm::EdDsa => Ed25519::generate_private_key(),
        Algorithm::Es256k => Secp256k1::generate_private_key(),
    }
}

/// Derive the public key for a private key of any supported algorithm.
///
/// # Errors
///
/// * `Err::InvalidPrivateKey` - The key is not a usable private key.
pub fn compute_public_key(private_key: &Jwk) -> Result<Jwk> {
    match private_algorithm(private_key)? {
        Algorithm::EdDsa => Ed25519::compute_public_key(private_key),
        Algorithm::Es256k => Secp256k1::compute_public_key(private_key),
    }
}

/// Sign a payload with a private key of any supported algorithm.
///
/// # Errors
///
/// * `Err::InvalidPrivateKey` - The key is not a usable private key.
pub fn sign(private_key: &Jwk, payload: &[u8]) -> Result<Vec<u8>> {
    match private_algorithm(private_key)? {
        Algorithm::EdDsa => Ed25519::sign(private_key, payload),
        Algorithm::Es256k => Secp256k1::sign(private_key, payload),
    }
}

/// Verify a signature using the algorithm implied by the public key.
///
/// # Errors
///
/// * `Err::SignatureInvalid` - The signature does not validate.
/// * `Err::MalformedKey` - The key does not describe a supported algorithm.
pub fn verify(public_key: &Jwk, payload: &[u8], signature: &[u8]) -> Result<()> {
    match public_key.infer_algorithm()? {
        Algorithm::EdDsa => Ed25519::verify(public_key, payload, signature),
        Algorithm::Es256k => Secp256k1::verify(public_key, payload, signature),
    }
}

/// Wrap raw public key bytes for the algorithm in a JWK.
///
/// # Errors
///
/// * `Err::MalformedKey` - The bytes have the wrong length for the algorithm.
pub fn bytes_to_public_key(alg: Algorithm, bytes: &[u8]) -> Result<Jwk> {
    match alg {
        Algorithm::EdDsa => Ed25519::bytes_to_public_key(bytes),
        Algorithm::Es256k => Secp256k1::bytes_to_public_key(bytes),
    }
}

fn private_algorithm(private_key: &Jwk) -> Result<Algorithm> {
    match private_key.infer_algorithm() {
        Ok(alg) => Ok(alg),
        Err(e) => tracerr!(Err::InvalidPrivateKey, "cannot use key: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip_bit(bytes: &[u8], bit: usize) -> Vec<u8> {
        let mut flipped = bytes.to_vec();
        flipped[bit / 8] ^= 1 << (bit % 8);
        flipped
    }

    #[test]
    fn sign_then_verify() {
        for alg in Algorithm::ALL {
            let key = generate_private_key(alg).expect("should generate");
            let public = compute_public_key(&key).expect("should compute");
            for payload in [&b""[..], b"hello world", &[0xffu8; 1024]] {
                let sig = sign(&key, payload).expect("should sign");
                verify(&public, payload, &sig).expect("should verify");
            }
        }
    }

    #[test]
    fn flipped_payload_bit_fails() {
        let payload = b"a payload of several bytes";
        for alg in Algorithm::ALL {
            let key = generate_private_key(alg).expect("should generate");
            let public = compute_public_key(&key).expect("should compute");
            let sig = sign(&key, payload).expect("should sign");
            for bit in 0..payload.len() * 8 {
                let err = verify(&public, &flip_bit(payload, bit), &sig).expect_err("should fail");
                assert!(err.is(Err::SignatureInvalid), "{alg} bit {bit}: {err}");
            }
        }
    }

    #[test]
    fn flipped_signature_bit_fails() {
        let payload = b"hello world";
        for alg in Algorithm::ALL {
            let key = generate_private_key(alg).expect("should generate");
            let public = compute_public_key(&key).expect("should compute");
            let sig = sign(&key, payload).expect("should sign");
            for bit in 0..sig.len() * 8 {
                let err = verify(&public, payload, &flip_bit(&sig, bit)).expect_err("should fail");
                assert!(err.is(Err::SignatureInvalid), "{alg} bit {bit}: {err}");
            }
        }
    }

    #[test]
    fn compute_public_key_is_deterministic() {
        for alg in Algorithm::ALL {
            let key = generate_private_key(alg).expect("should generate");
            let first = compute_public_key(&key).expect("should compute");
            let second = compute_public_key(&key).expect("should compute");
            assert_eq!(first, second);
            assert_eq!(
                first.encode().expect("should encode"),
                second.encode().expect("should encode")
            );
        }
    }

    #[test]
    fn wrong_public_key_fails() {
        for alg in Algorithm::ALL {
            let key = generate_private_key(alg).expect("should generate");
            let other = compute_public_key(&generate_private_key(alg).expect("should generate"))
                .expect("should compute");
            let sig = sign(&key, b"msg").expect("should sign");
            let err = verify(&other, b"msg", &sig).expect_err("should fail");
            assert!(err.is(Err::SignatureInvalid));
        }
    }

    #[test]
    fn raw_public_key() {
        let ed_raw = [7u8; 32];
        let jwk = bytes_to_public_key(Algorithm::EdDsa, &ed_raw).expect("should wrap");
        assert_eq!(jwk.infer_algorithm().expect("should infer"), Algorithm::EdDsa);
        assert!(bytes_to_public_key(Algorithm::Es256k, &ed_raw).is_err());
    }
}
