//! Nonce randomness as an injected capability.
//!
//! Production code uses [`OsRandom`], backed by the operating-system CSPRNG.
//! Tests substitute fixed or failing sources to pin down nonce-independent
//! behaviour.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use thiserror::Error;

/// Failure to obtain random bytes.
#[derive(Debug, Error)]
#[error("random source failed: {0}")]
pub struct RandomError(String);

impl RandomError {
    /// Create a [`RandomError`] carrying a description of the failure.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A source of cryptographically secure random bytes.
///
/// Implementations must either fill `dest` completely or return an error.
/// A partial fill is never acceptable. Implementations shared across threads
/// must be safe for concurrent use.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RandomError`] if the source cannot supply `dest.len()` bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError>;
}

/// The operating-system CSPRNG (`getrandom`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomError::new(e.to_string()))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        (**self).fill(dest)
    }
}
