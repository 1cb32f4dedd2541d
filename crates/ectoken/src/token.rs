//! Token framing and transport encoding.
//!
//! # Wire format
//!
//! ```text
//! base64url-no-pad( nonce[12] ‖ ciphertext[len(plaintext)] ‖ tag[16] )
//! ```
//!
//! Issued tokens never carry `=` padding. Decoders that use a strict base64
//! implementation must re-pad to a multiple of 4 characters first;
//! [`SealedToken::decode`] accepts both padded and unpadded input.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD},
        DecodePaddingMode,
    },
    Engine as _,
};

use crate::crypto::{NONCE_LEN, TAG_LEN};
use crate::error::TokenError;

/// Smallest valid decoded token: nonce plus tag, empty ciphertext.
pub const MIN_TOKEN_LEN: usize = NONCE_LEN + TAG_LEN;

/// URL-safe decoder that tolerates re-added `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A sealed token: nonce and AEAD output, before or after transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedToken {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext followed by the 16-byte authentication tag.
    pub ciphertext_and_tag: Vec<u8>,
}

impl SealedToken {
    /// Concatenate `nonce ‖ ciphertext ‖ tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(NONCE_LEN + self.ciphertext_and_tag.len());
        blob.extend_from_slice(&self.nonce);
        blob.extend_from_slice(&self.ciphertext_and_tag);
        blob
    }

    /// Split a decoded blob into nonce and `ciphertext ‖ tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Truncated`] if `blob` is shorter than
    /// [`MIN_TOKEN_LEN`].
    pub fn from_bytes(blob: &[u8]) -> Result<Self, TokenError> {
        if blob.len() < MIN_TOKEN_LEN {
            return Err(TokenError::Truncated { len: blob.len() });
        }
        let (nonce_bytes, rest) = blob.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            ciphertext_and_tag: rest.to_vec(),
        })
    }

    /// Render as unpadded URL-safe base64.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_bytes())
    }

    /// Parse an encoded token, with or without trailing `=` padding.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidEncoding`] if `token` is not URL-safe
    /// base64, or [`TokenError::Truncated`] if it decodes to fewer than
    /// [`MIN_TOKEN_LEN`] bytes.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let blob = URL_SAFE_LENIENT
            .decode(token)
            .map_err(|_| TokenError::InvalidEncoding)?;
        Self::from_bytes(&blob)
    }
}

/// Length of the unpadded token issued for a plaintext of `plaintext_len`
/// bytes, or `None` on overflow.
pub fn encoded_len(plaintext_len: usize) -> Option<usize> {
    let blob_len = plaintext_len.checked_add(MIN_TOKEN_LEN)?;
    base64::encoded_len(blob_len, false)
}
