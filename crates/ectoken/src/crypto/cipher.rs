//! AES-256-GCM sealing and opening of token payloads.
//!
//! **Algorithm:** AES-256-GCM with a 96-bit nonce, a 128-bit tag and empty
//! associated data. GCM nonce reuse under one key is catastrophic: it breaks
//! both confidentiality and authentication. Every seal therefore takes a nonce
//! drawn fresh from a [`RandomSource`](super::random::RandomSource).
//!
//! The expanded AES key schedule is zeroized when the cipher is dropped at
//! the end of each call.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use super::key::DerivedKey;
use crate::error::TokenError;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` and `nonce`.
///
/// Returns `ciphertext ‖ tag`; the ciphertext is exactly `plaintext.len()`
/// bytes.
///
/// # Errors
///
/// Returns [`TokenError::KeySetup`] if the cipher rejects the key, and
/// [`TokenError::Seal`] on an internal AEAD failure.
pub fn seal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, TokenError> {
    build_cipher(key)?
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| TokenError::Seal)
}

/// Decrypt and authenticate `ciphertext ‖ tag` under `key` and `nonce`.
///
/// # Errors
///
/// Returns [`TokenError::KeySetup`] if the cipher rejects the key, and
/// [`TokenError::Authentication`] if the tag does not verify.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext_and_tag: &[u8],
) -> Result<Vec<u8>, TokenError> {
    build_cipher(key)?
        .decrypt(Nonce::from_slice(nonce), ciphertext_and_tag)
        .map_err(|_| TokenError::Authentication)
}

fn build_cipher(key: &DerivedKey) -> Result<Aes256Gcm, TokenError> {
    Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| TokenError::KeySetup)
}
