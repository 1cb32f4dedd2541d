//! Authenticated, URL-safe encrypted access tokens.
//!
//! A token carries an opaque payload (typically access-control directives
//! such as `ec_expire=1700000000`) sealed with AES-256-GCM under a key
//! derived from a shared secret:
//!
//! ```text
//! key   = SHA-256(secret)
//! token = base64url-no-pad( nonce[12] ‖ ciphertext ‖ tag[16] )
//! ```
//!
//! ```
//! let token = ectoken::encrypt("s3cr3t", "ec_expire=1700000000")?;
//! assert_eq!(ectoken::decrypt("s3cr3t", &token)?, "ec_expire=1700000000");
//! # Ok::<(), ectoken::TokenError>(())
//! ```
//!
//! Every call draws a fresh nonce, so the same inputs never produce the same
//! token twice. The token embeds no key identifier; relying parties that
//! accept several secrets must try each in turn.

pub mod crypto;
pub mod encryptor;
pub mod error;
pub mod token;

pub use crypto::{OsRandom, RandomError, RandomSource, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use encryptor::{decrypt, decrypt_bytes, encrypt, encrypt_bytes, TokenEncryptor};
pub use error::TokenError;
pub use token::{encoded_len, SealedToken, MIN_TOKEN_LEN};
