//! Cryptographic key representation, signature algorithm identities and the traits for key
//! management and digital signature algorithms.

use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub mod dsa;
pub mod keyring;

use crate::error::Err;
use crate::{debugerr, tracerr, Result};

/// Length in bytes of an Ed25519 public or private key and of a secp256k1 private key or affine
/// coordinate.
pub const KEY_LENGTH: usize = 32;

/// Simplified JSON Web Key (JWK) key structure.
///
/// Members are declared in lexicographic order so the serialized form is stable. Absent members
/// are omitted. Members without a field of their own, such as `use` or `key_ops`, are kept in
/// `extra` and serialized after the declared members.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct Jwk {
    /// Signature algorithm the key is intended for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<Algorithm>,
    /// Cryptographic curve type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<Curve>,
    /// Private key component. Only present on private keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// Key identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Key type.
    pub kty: KeyType,
    /// Public key component: the encoded point for `OKP` keys or the X coordinate for `EC` keys.
    pub x: String,
    /// Y coordinate for `EC` keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Any other members of the key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The private component is redacted.
impl Debug for Jwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwk")
            .field("alg", &self.alg)
            .field("crv", &self.crv)
            .field("d", &self.d.as_ref().map(|_| "<redacted>"))
            .field("kid", &self.kid)
            .field("kty", &self.kty)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("extra", &self.extra)
            .finish()
    }
}

impl Jwk {
    /// Serialize the key to JSON and encode it as an unpadded base64url token.
    ///
    /// # Errors
    ///
    /// * `Err::SerializationError` - The key could not be serialized.
    pub fn encode(&self) -> Result<String> {
        let serialized = serde_json::to_vec(self)?;
        Ok(Base64UrlUnpadded::encode_string(&serialized))
    }

    /// Decode a key from an unpadded base64url token of its JSON representation. The decoded key
    /// is checked against the structure required by its key type and curve.
    ///
    /// # Errors
    ///
    /// * `Err::MalformedKey` - The token is not base64url, not JSON, not a JWK or the JWK members
    ///   are invalid for its key type.
    pub fn decode(token: &str) -> Result<Self> {
        let serialized = match Base64UrlUnpadded::decode_vec(token) {
            Ok(s) => s,
            Err(e) => debugerr!(Err::MalformedKey, "key is not base64url encoded: {}", e),
        };
        let jwk: Self = match serde_json::from_slice(&serialized) {
            Ok(j) => j,
            Err(e) => debugerr!(Err::MalformedKey, "key is not a valid JWK: {}", e),
        };
        jwk.check()?;
        Ok(jwk)
    }

    /// Whether the key carries a private component.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.d.is_some()
    }

    /// A copy of the key with the private component removed.
    #[must_use]
    pub fn to_public(&self) -> Self {
        Self {
            d: None,
            ..self.clone()
        }
    }

    /// Attempt to match the public key parameters to one of the supported algorithm types.
    ///
    /// # Returns
    ///
    /// The algorithm type implied by the key structure.
    ///
    /// # Errors
    ///
    /// * `Err::MalformedKey` - The key type and curve do not describe a supported algorithm.
    pub fn infer_algorithm(&self) -> Result<Algorithm> {
        match (self.kty, self.crv) {
            (KeyType::Okp, Some(Curve::Ed25519)) => Ok(Algorithm::EdDsa),
            (KeyType::Ec, Some(Curve::Secp256k1)) => Ok(Algorithm::Es256k),
            (kty, crv) => {
                debugerr!(Err::MalformedKey, "unsupported key type and curve: {} {:?}", kty, crv)
            }
        }
    }

    /// Check that the structure of the key is valid for the algorithm implied by its key type
    /// and curve, and that a declared `alg` agrees.
    ///
    /// # Returns
    ///
    /// The algorithm type implied by the key structure.
    ///
    /// # Errors
    ///
    /// * `Err::MalformedKey` - The key structure is invalid.
    pub fn check(&self) -> Result<Algorithm> {
        let alg = self.infer_algorithm()?;
        if let Some(declared) = self.alg {
            if declared != alg {
                debugerr!(Err::MalformedKey, "alg {} does not match curve of key", declared);
            }
        }
        check_component("x", &self.x)?;
        match alg {
            Algorithm::EdDsa => {
                if self.y.is_some() {
                    debugerr!(Err::MalformedKey, "y coordinate is not valid on an OKP key");
                }
            }
            Algorithm::Es256k => {
                let Some(y) = &self.y else {
                    debugerr!(Err::MalformedKey, "missing y coordinate");
                };
                check_component("y", y)?;
            }
        }
        Ok(alg)
    }

    /// Compute the RFC 7638 thumbprint of the key: the SHA-256 digest of the required public
    /// members in lexicographic order, base64url encoded.
    ///
    /// # Errors
    ///
    /// * `Err::MalformedKey` - The key structure is invalid.
    pub fn thumbprint(&self) -> Result<String> {
        let alg = self.check()?;
        let members = match alg {
            Algorithm::EdDsa => serde_json::json!({
                "crv": alg.curve(),
                "kty": alg.key_type(),
                "x": self.x,
            }),
            Algorithm::Es256k => serde_json::json!({
                "crv": alg.curve(),
                "kty": alg.key_type(),
                "x": self.x,
                "y": self.y,
            }),
        };
        // `serde_json` maps are sorted unless `preserve_order` is enabled
        let serialized = serde_json::to_vec(&members)?;
        Ok(Base64UrlUnpadded::encode_string(&Sha256::digest(serialized)))
    }
}

fn check_component(name: &str, value: &str) -> Result<()> {
    match Base64UrlUnpadded::decode_vec(value) {
        Ok(raw) if raw.len() == KEY_LENGTH => Ok(()),
        Ok(raw) => debugerr!(
            Err::MalformedKey,
            "invalid {} length. Expected {} bytes, got {}",
            name,
            KEY_LENGTH,
            raw.len()
        ),
        Err(e) => debugerr!(Err::MalformedKey, "invalid {} encoding: {}", name, e),
    }
}

/// JWK key type (`kty`).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum KeyType {
    /// Octet key pair. Used for Edwards curve keys.
    #[serde(rename = "OKP")]
    Okp,
    /// Elliptic curve. Used for short Weierstrass curve keys.
    #[serde(rename = "EC")]
    Ec,
}

impl Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Okp => write!(f, "OKP"),
            Self::Ec => write!(f, "EC"),
        }
    }
}

/// JWK cryptographic curve (`crv`).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Curve {
    /// Edwards curve 25519 used by EdDSA.
    Ed25519,
    /// The Koblitz curve used by ES256K.
    #[serde(rename = "secp256k1")]
    Secp256k1,
}

impl Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ed25519 => write!(f, "Ed25519"),
            Self::Secp256k1 => write!(f, "secp256k1"),
        }
    }
}

/// Types of key signature algorithm supported.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Algorithm {
    /// EdDSA using the Ed25519 curve.
    #[serde(rename = "EdDSA")]
    EdDsa,
    /// ECDSA using the secp256k1 curve and SHA-256.
    #[serde(rename = "ES256K")]
    Es256k,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 2] = [Self::EdDsa, Self::Es256k];

    /// The JWK key type for keys of this algorithm.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        match self {
            Self::EdDsa => KeyType::Okp,
            Self::Es256k => KeyType::Ec,
        }
    }

    /// The JWK curve for keys of this algorithm.
    #[must_use]
    pub const fn curve(&self) -> Curve {
        match self {
            Self::EdDsa => Curve::Ed25519,
            Self::Es256k => Curve::Secp256k1,
        }
    }

    /// Get the verification method type registered for keys of this algorithm.
    #[must_use]
    pub fn cryptosuite(&self) -> String {
        match self {
            Self::EdDsa => "Ed25519VerificationKey2020".to_string(),
            Self::Es256k => "EcdsaSecp256k1VerificationKey2019".to_string(),
        }
    }
}

/// Key signature type display label.
impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EdDsa => write!(f, "EdDSA"),
            Self::Es256k => write!(f, "ES256K"),
        }
    }
}

/// Parse an algorithm tag. Curve names are accepted as aliases.
impl FromStr for Algorithm {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EdDSA" | "Ed25519" => Ok(Self::EdDsa),
            "ES256K" | "secp256k1" => Ok(Self::Es256k),
            _ => tracerr!(Err::UnsupportedAlgorithm, "unsupported algorithm: {}", s),
        }
    }
}
