//! Error taxonomy for token issuance and verification.

use thiserror::Error;

use crate::crypto::random::RandomError;
use crate::token::MIN_TOKEN_LEN;

/// Errors produced while issuing or opening a token.
///
/// Every variant means "no token" (or "no plaintext"): there is no partial
/// success and callers must never fall back to a truncated value.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The random source could not supply the nonce bytes.
    ///
    /// The whole call is aborted. Retrying the call draws fresh randomness.
    #[error("secure random source unavailable")]
    RandomnessUnavailable(#[from] RandomError),

    /// The AEAD primitive rejected the derived key.
    ///
    /// Unreachable with a SHA-256 derived key; treated as an invariant violation.
    #[error("AEAD key setup failed")]
    KeySetup,

    /// AES-256-GCM sealing failed internally.
    #[error("AEAD seal failed")]
    Seal,

    /// The token is not valid URL-safe base64.
    #[error("token is not valid URL-safe base64")]
    InvalidEncoding,

    /// The decoded token is shorter than nonce plus tag.
    #[error("token too short: {len} bytes, need at least {MIN_TOKEN_LEN}")]
    Truncated {
        /// Length of the decoded blob.
        len: usize,
    },

    /// The authentication tag did not verify: wrong secret or tampered token.
    #[error("token authentication failed")]
    Authentication,

    /// The opened plaintext is not UTF-8.
    #[error("token plaintext is not valid UTF-8")]
    InvalidUtf8,
}

impl TokenError {
    /// Returns `true` if repeating the whole call may succeed.
    ///
    /// Only randomness failures are transient; everything else is terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TokenError::RandomnessUnavailable(_))
    }
}
