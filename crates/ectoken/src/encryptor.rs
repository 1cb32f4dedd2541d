//! [`TokenEncryptor`]: issue and open tokens from a shared secret.

use crate::crypto::{cipher, DerivedKey, OsRandom, RandomSource, NONCE_LEN};
use crate::error::TokenError;
use crate::token::SealedToken;

/// Issues tokens using an injected nonce [`RandomSource`].
///
/// Stateless apart from the random source: a single encryptor may be shared
/// across threads whenever `R` is `Sync`.
#[derive(Debug, Clone, Default)]
pub struct TokenEncryptor<R = OsRandom> {
    random: R,
}

impl TokenEncryptor<OsRandom> {
    /// An encryptor backed by the operating-system CSPRNG.
    pub fn new() -> Self {
        Self { random: OsRandom }
    }
}

impl<R: RandomSource> TokenEncryptor<R> {
    /// An encryptor drawing nonces from `random`.
    pub fn with_random_source(random: R) -> Self {
        Self { random }
    }

    /// Seal `plaintext` under `SHA-256(secret)` with a fresh nonce.
    ///
    /// Calling this twice with identical inputs yields two different tokens.
    ///
    /// # Errors
    ///
    /// - [`TokenError::RandomnessUnavailable`] if the random source fails.
    /// - [`TokenError::KeySetup`] / [`TokenError::Seal`] on AEAD failure.
    pub fn seal(&self, secret: &[u8], plaintext: &[u8]) -> Result<SealedToken, TokenError> {
        let mut nonce = [0u8; NONCE_LEN];
        self.random.fill(&mut nonce)?;

        let key = DerivedKey::derive(secret);
        let ciphertext_and_tag = cipher::seal(&key, &nonce, plaintext)?;

        Ok(SealedToken {
            nonce,
            ciphertext_and_tag,
        })
    }

    /// Seal `plaintext` and render it as an unpadded URL-safe base64 token.
    ///
    /// # Errors
    ///
    /// See [`TokenEncryptor::seal`].
    pub fn encrypt_bytes(&self, secret: &[u8], plaintext: &[u8]) -> Result<String, TokenError> {
        self.seal(secret, plaintext).map(|t| t.encode())
    }

    /// String form of [`TokenEncryptor::encrypt_bytes`].
    ///
    /// # Errors
    ///
    /// See [`TokenEncryptor::seal`].
    pub fn encrypt(&self, secret: &str, plaintext: &str) -> Result<String, TokenError> {
        self.encrypt_bytes(secret.as_bytes(), plaintext.as_bytes())
    }
}

/// Issue a token for `plaintext` using the operating-system CSPRNG.
///
/// # Errors
///
/// See [`TokenEncryptor::seal`].
pub fn encrypt(secret: &str, plaintext: &str) -> Result<String, TokenError> {
    TokenEncryptor::new().encrypt(secret, plaintext)
}

/// Byte-slice form of [`encrypt`].
///
/// # Errors
///
/// See [`TokenEncryptor::seal`].
pub fn encrypt_bytes(secret: &[u8], plaintext: &[u8]) -> Result<String, TokenError> {
    TokenEncryptor::new().encrypt_bytes(secret, plaintext)
}

/// Open a token issued under `secret`, returning the raw plaintext.
///
/// # Errors
///
/// - [`TokenError::InvalidEncoding`] if `token` is not URL-safe base64.
/// - [`TokenError::Truncated`] if it is shorter than nonce plus tag.
/// - [`TokenError::Authentication`] on a wrong secret or any tampering.
pub fn decrypt_bytes(secret: &[u8], token: &str) -> Result<Vec<u8>, TokenError> {
    let sealed = SealedToken::decode(token)?;
    let key = DerivedKey::derive(secret);
    cipher::open(&key, &sealed.nonce, &sealed.ciphertext_and_tag)
}

/// Open a token issued under `secret`, returning UTF-8 plaintext.
///
/// # Errors
///
/// As [`decrypt_bytes`], plus [`TokenError::InvalidUtf8`].
pub fn decrypt(secret: &str, token: &str) -> Result<String, TokenError> {
    let plaintext = decrypt_bytes(secret.as_bytes(), token)?;
    String::from_utf8(plaintext).map_err(|_| TokenError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use proptest::prelude::*;

    use super::*;
    use crate::crypto::random::{MockRandomSource, RandomError};
    use crate::crypto::TAG_LEN;
    use crate::token::{encoded_len, MIN_TOKEN_LEN};

    const SECRET: &str = "s3cr3t";
    const PAYLOAD: &str = "ec_expire=1700000000";

    fn counting_nonce() -> MockRandomSource {
        let mut mock = MockRandomSource::new();
        mock.expect_fill().returning(|dest| {
            for (i, b) in dest.iter_mut().enumerate() {
                *b = i as u8;
            }
            Ok(())
        });
        mock
    }

    fn decoded_len(token: &str) -> usize {
        URL_SAFE_NO_PAD.decode(token).unwrap().len()
    }

    #[test]
    fn known_answer_with_fixed_nonce() {
        let enc = TokenEncryptor::with_random_source(counting_nonce());
        assert_eq!(
            enc.encrypt(SECRET, PAYLOAD).unwrap(),
            "AAECAwQFBgcICQoLXUgI_FkBXjlYUAZPQgjMBAy9LStU4DLNjMTYTe5OUcpDqIEg"
        );
    }

    #[test]
    fn known_answer_empty_plaintext() {
        let enc = TokenEncryptor::with_random_source(counting_nonce());
        assert_eq!(
            enc.encrypt(SECRET, "").unwrap(),
            "AAECAwQFBgcICQoLELEnvOs-dOiAf6xnCM6r-Q"
        );
    }

    #[test]
    fn concrete_scenario() {
        let token = encrypt(SECRET, PAYLOAD).unwrap();
        assert_eq!(token.len(), 64);
        assert_eq!(Some(token.len()), encoded_len(PAYLOAD.len()));
        assert_eq!(decoded_len(&token), NONCE_LEN + PAYLOAD.len() + TAG_LEN);
        assert_eq!(decrypt(SECRET, &token).unwrap(), PAYLOAD);
        assert!(matches!(
            decrypt("wrong", &token),
            Err(TokenError::Authentication)
        ));
    }

    #[test]
    fn empty_plaintext_decodes_to_28_bytes() {
        let token = encrypt(SECRET, "").unwrap();
        assert_eq!(decoded_len(&token), MIN_TOKEN_LEN);
        assert_eq!(decrypt(SECRET, &token).unwrap(), "");
    }

    #[test]
    fn repeated_calls_differ_and_both_open() {
        let a = encrypt(SECRET, PAYLOAD).unwrap();
        let b = encrypt(SECRET, PAYLOAD).unwrap();
        assert_ne!(a, b);
        assert_eq!(decrypt(SECRET, &a).unwrap(), PAYLOAD);
        assert_eq!(decrypt(SECRET, &b).unwrap(), PAYLOAD);
    }

    #[test]
    fn nonces_are_unique_across_many_calls() {
        let enc = TokenEncryptor::new();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let sealed = enc.seal(SECRET.as_bytes(), PAYLOAD.as_bytes()).unwrap();
            assert!(seen.insert(sealed.nonce), "nonce collision");
        }
    }

    #[test]
    fn failing_random_source_issues_no_token() {
        let mut mock = MockRandomSource::new();
        mock.expect_fill()
            .times(1)
            .returning(|_| Err(RandomError::new("entropy unavailable")));
        let enc = TokenEncryptor::with_random_source(mock);
        let err = enc.encrypt(SECRET, PAYLOAD).unwrap_err();
        assert!(matches!(err, TokenError::RandomnessUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn nonce_is_requested_at_full_length() {
        let mut mock = MockRandomSource::new();
        mock.expect_fill()
            .times(1)
            .returning(|dest| {
                assert_eq!(dest.len(), NONCE_LEN);
                dest.fill(0xAB);
                Ok(())
            });
        let sealed = TokenEncryptor::with_random_source(mock)
            .seal(b"k", b"v")
            .unwrap();
        assert_eq!(sealed.nonce, [0xAB; NONCE_LEN]);
    }

    #[test]
    fn every_single_byte_flip_fails_authentication() {
        let enc = TokenEncryptor::new();
        let blob = enc.seal(SECRET.as_bytes(), PAYLOAD.as_bytes()).unwrap().to_bytes();
        for i in 0..blob.len() {
            let mut tampered = blob.clone();
            tampered[i] ^= 0x01;
            let token = URL_SAFE_NO_PAD.encode(&tampered);
            assert!(
                matches!(decrypt(SECRET, &token), Err(TokenError::Authentication)),
                "flip at byte {i} was accepted"
            );
        }
    }

    #[test]
    fn every_character_substitution_is_rejected() {
        let token = encrypt(SECRET, PAYLOAD).unwrap();
        for i in 0..token.len() {
            let mut chars: Vec<char> = token.chars().collect();
            chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
            let tampered: String = chars.into_iter().collect();
            assert!(decrypt(SECRET, &tampered).is_err(), "substitution at {i} accepted");
        }
    }

    #[test]
    fn repadded_token_still_opens() {
        let mut token = encrypt(SECRET, "ec_url_allow=/videos").unwrap();
        while token.len() % 4 != 0 {
            token.push('=');
        }
        assert_eq!(decrypt(SECRET, &token).unwrap(), "ec_url_allow=/videos");
    }

    #[test]
    fn non_utf8_plaintext_needs_byte_api() {
        let token = encrypt_bytes(b"k", &[0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(decrypt_bytes(b"k", &token).unwrap(), vec![0xff, 0xfe, 0x00]);
        assert!(matches!(decrypt("k", &token), Err(TokenError::InvalidUtf8)));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            decrypt(SECRET, "not a token!"),
            Err(TokenError::InvalidEncoding)
        ));
        assert!(matches!(
            decrypt(SECRET, "AAAA"),
            Err(TokenError::Truncated { len: 3 })
        ));
    }

    #[test]
    fn encryptor_is_shareable_across_threads() {
        let enc = std::sync::Arc::new(TokenEncryptor::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let enc = enc.clone();
                std::thread::spawn(move || {
                    let payload = format!("ec_expire={i}");
                    let token = enc.encrypt(SECRET, &payload).unwrap();
                    assert_eq!(decrypt(SECRET, &token).unwrap(), payload);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    proptest! {
        #[test]
        fn round_trip_any_input(secret in ".*", plaintext in proptest::collection::vec(any::<u8>(), 0..512)) {
            let token = encrypt_bytes(secret.as_bytes(), &plaintext).unwrap();
            prop_assert_eq!(decrypt_bytes(secret.as_bytes(), &token).unwrap(), plaintext);
        }

        #[test]
        fn length_and_alphabet_invariants(plaintext in proptest::collection::vec(any::<u8>(), 0..512)) {
            let token = encrypt_bytes(b"s3cr3t", &plaintext).unwrap();
            prop_assert!(token
                .bytes()
                .all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_'));
            prop_assert_eq!(decoded_len(&token), NONCE_LEN + plaintext.len() + TAG_LEN);
            prop_assert_eq!(Some(token.len()), encoded_len(plaintext.len()));
        }
    }
}
