//! Fixed keys for use in tests.

// RFC 8037, appendix A.1
/// Private component of the Ed25519 test key.
pub const ED25519_PRIVATE: &str = "nWGxne_9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A";
/// Public component of the Ed25519 test key.
pub const ED25519_PUBLIC: &str = "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo";
/// JWK thumbprint of the Ed25519 test key.
pub const ED25519_THUMBPRINT: &str = "kPrK_qmxVWaYVA9wwBF6Iuo3vVzz7TxHCTwXBygrS4k";

// jwkEs256k1Private
/// Private component of the secp256k1 test key.
pub const SECP256K1_PRIVATE: &str = "CB6W6NKEuI4uiYiyM2CM4YzczOYXdx-ykAe5rlZaB-Q";
/// X coordinate of the secp256k1 test key.
pub const SECP256K1_X: &str = "XFl4fd9n4qp2Gcc2_oqqUsI3uT63o3Jt0f54DiNOijw";
/// Y coordinate of the secp256k1 test key.
pub const SECP256K1_Y: &str = "IH_q19UKDu_jkIwtehWU7NiaXk7CaGoD-XRcuuqcgQ0";
