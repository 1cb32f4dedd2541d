//! [`DerivedKey`]: the AES-256 key computed from a caller-supplied secret.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer holding `SHA-256(secret)`.
///
/// Lives only for the duration of one encrypt or decrypt call. The bytes are
/// zeroized on drop. Neither `Clone` nor `PartialEq`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Derive the key for `secret`.
    ///
    /// The derivation is unkeyed and unsalted: a relying party holding the
    /// same secret computes the identical key with no other shared state.
    /// An empty secret is accepted and yields `SHA-256("")`, which offers no
    /// protection at all.
    pub fn derive(secret: &[u8]) -> Self {
        Self(Sha256::digest(secret).into())
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}
