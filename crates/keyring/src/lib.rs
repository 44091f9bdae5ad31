//! Digital signature algorithm implementations and a [`KeyManager`] for keys that are generated
//! and used in-memory and disappear when out of scope.
//!
//! [`KeyManager`]: did_core::KeyManager

pub mod crypto;
mod ed25519;
mod keyring;
mod secp256k1;

use base64ct::{Base64UrlUnpadded, Encoding};
use did_core::error::Err;
use did_core::{tracerr, Dsa, Jwk, Result};

pub use self::ed25519::Ed25519;
pub use self::keyring::EphemeralKeyRing;
pub use self::secp256k1::Secp256k1;

/// Fail with `code` unless the key type and curve of the JWK are those of the algorithm
/// implemented by `D`.
fn check_family<D: Dsa>(jwk: &Jwk, code: Err) -> Result<()> {
    if jwk.kty != D::KEY_TYPE || jwk.crv != Some(D::CURVE) {
        tracerr!(code, "key is not a {} {} key", D::KEY_TYPE, D::CURVE);
    }
    if let Some(alg) = jwk.alg {
        if alg != D::ALGORITHM {
            tracerr!(code, "key alg {} is not {}", alg, D::ALGORITHM);
        }
    }
    Ok(())
}

/// Decode a base64url key component of exactly `N` bytes, failing with `code`.
fn decode_component<const N: usize>(name: &str, value: &str, code: Err) -> Result<[u8; N]> {
    let raw = match Base64UrlUnpadded::decode_vec(value) {
        Ok(raw) => raw,
        Err(e) => tracerr!(code, "invalid {} encoding: {}", name, e),
    };
    match <[u8; N]>::try_from(raw.as_slice()) {
        Ok(bytes) => Ok(bytes),
        Err(_) => {
            tracerr!(code, "invalid {} length. Expected {} bytes, got {}", name, N, raw.len())
        }
    }
}

/// The decoded private component of a key for the algorithm implemented by `D`.
fn private_component<D: Dsa, const N: usize>(private_key: &Jwk) -> Result<[u8; N]> {
    check_family::<D>(private_key, Err::InvalidPrivateKey)?;
    let Some(d) = &private_key.d else {
        tracerr!(Err::InvalidPrivateKey, "no private key component");
    };
    decode_component("d", d, Err::InvalidPrivateKey)
}
