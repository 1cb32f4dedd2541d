//! AES-256-GCM token primitives.
//!
//! Free of I/O and logging. Provides key derivation, the nonce random source
//! and the low-level seal/open operations used by
//! [`TokenEncryptor`](crate::TokenEncryptor).
//!
//! # Key derivation
//!
//! ```text
//! key = SHA-256(secret)
//! ```

pub mod cipher;
pub mod key;
pub mod random;

pub use cipher::{NONCE_LEN, TAG_LEN};
pub use key::{DerivedKey, KEY_LEN};
pub use random::{OsRandom, RandomError, RandomSource};
