//! Digital signature algorithm abstraction. One implementation exists per supported
//! [`Algorithm`]; implementations hold no state so a single implementation can be shared freely
//! between callers.

use crate::keys::{Algorithm, Curve, Jwk, KeyType};
use crate::Result;

/// Key generation, signing and verification for a single signature algorithm, with keys
/// expressed as [`Jwk`]s.
pub trait Dsa {
    /// The algorithm implemented.
    const ALGORITHM: Algorithm;

    /// JWK key type of keys for this algorithm.
    const KEY_TYPE: KeyType;

    /// JWK curve of keys for this algorithm.
    const CURVE: Curve;

    /// Generate a new private key using a cryptographically secure random source.
    ///
    /// # Returns
    ///
    /// A private JWK with both the private (`d`) and public (`x`, and `y` where applicable)
    /// components populated.
    ///
    /// # Errors
    ///
    /// An error is returned if the key could not be expressed as a JWK.
    fn generate_private_key() -> Result<Jwk>;

    /// Derive the public key for a private key. The result depends only on the private
    /// component.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPrivateKey` - The private component is absent or has the wrong length or
    ///   format for the algorithm.
    fn compute_public_key(private_key: &Jwk) -> Result<Jwk>;

    /// Sign a payload.
    ///
    /// # Arguments
    ///
    /// * `private_key` - The private JWK to sign with.
    /// * `payload` - The bytes to sign.
    ///
    /// # Returns
    ///
    /// The raw signature bytes, of a fixed length for the algorithm.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPrivateKey` - The private key cannot be used.
    fn sign(private_key: &Jwk, payload: &[u8]) -> Result<Vec<u8>>;

    /// Verify a signature over a payload.
    ///
    /// # Errors
    ///
    /// * `Err::SignatureInvalid` - The signature does not validate for the payload and key.
    /// * `Err::MalformedKey` - The public key cannot be used.
    fn verify(public_key: &Jwk, payload: &[u8], signature: &[u8]) -> Result<()>;

    /// Wrap raw public key bytes in a JWK. Only the length of the input is checked.
    ///
    /// # Errors
    ///
    /// * `Err::MalformedKey` - The input has the wrong length or format for the algorithm.
    fn bytes_to_public_key(bytes: &[u8]) -> Result<Jwk>;

    /// Express a public JWK as raw public key bytes, the inverse of
    /// [`Dsa::bytes_to_public_key`].
    ///
    /// # Errors
    ///
    /// * `Err::MalformedKey` - The key is not a valid key for the algorithm.
    fn public_key_to_bytes(public_key: &Jwk) -> Result<Vec<u8>>;
}
