//! AES-256-GCM sealing with the wallet-wire IV layout.
//!
//! The wire format carries a 32-byte random initialisation value rather than
//! the canonical 12-byte GCM nonce; AES-GCM processes longer IVs through
//! GHASH per the original specification, which `aes-gcm`'s generic nonce
//! parameter implements. Output layout:
//!
//! ```text
//! iv (32 bytes) || ciphertext || tag (16 bytes)
//! ```

use aes_gcm::{
    aead::{consts::U32, Aead, KeyInit},
    aes::Aes256,
    AesGcm, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256-GCM parameterised over the 32-byte IV the wire format uses.
type Aes256Gcm32 = AesGcm<Aes256, U32>;

/// Length of the random initialisation value prepended to every message.
pub const IV_LEN: usize = 32;

/// Length of the GCM authentication tag appended to every message.
pub const TAG_LEN: usize = 16;

/// Error from symmetric sealing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AeadError {
    /// The ciphertext failed to authenticate: wrong key, truncated input, or
    /// tampered bytes. Deliberately indistinguishable.
    #[error("message authentication failed")]
    AuthenticationFailed,

    /// Encryption itself failed. Not reachable with valid parameters.
    #[error("encryption failed")]
    EncryptionFailed,
}

/// A 32-byte symmetric key, zeroised on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; 32]);

impl SymmetricKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Seal `plaintext` under a fresh random 32-byte IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, AeadError> {
        let cipher = Aes256Gcm32::new(Key::<Aes256Gcm32>::from_slice(&self.0));

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = cipher
            .encrypt(Nonce::<U32>::from_slice(&iv), plaintext)
            .map_err(|_| AeadError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Open a message in the `iv || ciphertext || tag` layout.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, AeadError> {
        if data.len() < IV_LEN + TAG_LEN {
            return Err(AeadError::AuthenticationFailed);
        }
        let (iv, ciphertext) = data.split_at(IV_LEN);

        let cipher = Aes256Gcm32::new(Key::<Aes256Gcm32>::from_slice(&self.0));
        cipher
            .decrypt(Nonce::<U32>::from_slice(iv), ciphertext)
            .map_err(|_| AeadError::AuthenticationFailed)
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("SymmetricKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(byte: u8) -> SymmetricKey {
        SymmetricKey::from_bytes([byte; 32])
    }

    #[test]
    fn round_trip() {
        let key = test_key(7);
        let sealed = key.encrypt(b"attack at dawn").unwrap();
        assert_eq!(key.decrypt(&sealed).unwrap(), b"attack at dawn");
    }

    #[test]
    fn output_layout_length() {
        let key = test_key(7);
        let sealed = key.encrypt(&[0u8; 10]).unwrap();
        assert_eq!(sealed.len(), IV_LEN + 10 + TAG_LEN);
    }

    #[test]
    fn fresh_iv_per_encryption() {
        let key = test_key(7);
        let first = key.encrypt(b"same message").unwrap();
        let second = key.encrypt(b"same message").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = test_key(7).encrypt(b"secret").unwrap();
        assert_eq!(
            test_key(8).decrypt(&sealed),
            Err(AeadError::AuthenticationFailed)
        );
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let key = test_key(7);
        let mut sealed = key.encrypt(b"secret").unwrap();
        let mid = IV_LEN + 1;
        sealed[mid] ^= 0xFF;
        assert_eq!(key.decrypt(&sealed), Err(AeadError::AuthenticationFailed));
    }

    #[test]
    fn truncated_input_fails() {
        let key = test_key(7);
        assert_eq!(
            key.decrypt(&[0u8; IV_LEN + TAG_LEN - 1]),
            Err(AeadError::AuthenticationFailed)
        );
    }

    #[test]
    fn empty_plaintext_round_trip() {
        let key = test_key(9);
        let sealed = key.encrypt(b"").unwrap();
        assert_eq!(sealed.len(), IV_LEN + TAG_LEN);
        assert_eq!(key.decrypt(&sealed).unwrap(), Vec::<u8>::new());
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn seal_open_round_trips(
                key_byte: u8,
                plaintext in proptest::collection::vec(any::<u8>(), 0..512),
            ) {
                let key = test_key(key_byte);
                let sealed = key.encrypt(&plaintext).unwrap();
                prop_assert_eq!(sealed.len(), IV_LEN + plaintext.len() + TAG_LEN);
                prop_assert_eq!(key.decrypt(&sealed).unwrap(), plaintext);
            }
        }
    }
}
