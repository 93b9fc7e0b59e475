//! The proto-wallet operations.

use k256::SecretKey;
use kestrel_key_deriv::{CachedKeyDeriver, Counterparty};
use kestrel_primitives::{
    anyone_secret_key,
    hashes::{hmac_sha256, sha256, verify_hmac_sha256},
    sign_prehash_der, verify_prehash_der,
};

use crate::{
    args::{
        CreateHmacArgs, CreateHmacResult, CreateSignatureArgs, CreateSignatureResult, DecryptArgs,
        DecryptResult, EncryptArgs, EncryptResult, GetPublicKeyArgs, GetPublicKeyResult,
        VerifyHmacArgs, VerifyHmacResult, VerifySignatureArgs, VerifySignatureResult,
    },
    error::WalletError,
};

/// A wallet capable of the foundational cryptographic operations: key
/// derivation, signatures, encryption and HMACs.
///
/// Each operation resolves an uninitialised counterparty to its
/// per-operation default, derives the appropriate key (through the LRU
/// cache), and delegates to a curve or cipher primitive. The per-operation
/// defaults differ — notably signing defaults to `Anyone` while
/// verification defaults to the holder themself — and are part of the
/// compatibility surface.
pub struct ProtoWallet {
    key_deriver: CachedKeyDeriver,
}

impl ProtoWallet {
    /// Build a proto-wallet over a root private key.
    pub fn new(root: SecretKey) -> Self {
        Self {
            key_deriver: CachedKeyDeriver::new(root, 0),
        }
    }

    /// Build a proto-wallet over the well-known "anyone" key (scalar 1).
    pub fn anyone() -> Self {
        Self::new(anyone_secret_key())
    }

    /// Build a proto-wallet over an existing caching deriver.
    pub fn from_deriver(key_deriver: CachedKeyDeriver) -> Self {
        Self { key_deriver }
    }

    /// Return the identity public key, or a derived public key for a
    /// `(protocol, keyID, counterparty)` context.
    pub fn get_public_key(
        &self,
        args: GetPublicKeyArgs,
        _originator: &str,
    ) -> Result<GetPublicKeyResult, WalletError> {
        if args.identity_key {
            return Ok(GetPublicKeyResult {
                public_key: *self.key_deriver.root_public_key(),
            });
        }

        if args.protocol.name.is_empty() || args.key_id.is_empty() {
            return Err(WalletError::MissingContext);
        }

        let counterparty = defaulted(args.counterparty, Counterparty::Myself);
        let public_key = self.key_deriver.derive_public(
            &args.protocol,
            &args.key_id,
            &counterparty,
            args.for_self,
        )?;
        Ok(GetPublicKeyResult { public_key })
    }

    /// Seal a message under the context's symmetric key.
    pub fn encrypt(&self, args: EncryptArgs, _originator: &str) -> Result<EncryptResult, WalletError> {
        let counterparty = defaulted(args.counterparty, Counterparty::Myself);
        let key = self
            .key_deriver
            .derive_symmetric(&args.protocol, &args.key_id, &counterparty)?;
        let ciphertext = key.encrypt(&args.plaintext)?;
        Ok(EncryptResult { ciphertext })
    }

    /// Open a message sealed under the context's symmetric key.
    pub fn decrypt(&self, args: DecryptArgs, _originator: &str) -> Result<DecryptResult, WalletError> {
        let counterparty = defaulted(args.counterparty, Counterparty::Myself);
        let key = self
            .key_deriver
            .derive_symmetric(&args.protocol, &args.key_id, &counterparty)?;
        let plaintext = key.decrypt(&args.ciphertext)?;
        Ok(DecryptResult { plaintext })
    }

    /// ECDSA-sign a message (or a directly supplied 32-byte digest) with
    /// the context's derived private key.
    pub fn create_signature(
        &self,
        args: CreateSignatureArgs,
        _originator: &str,
    ) -> Result<CreateSignatureResult, WalletError> {
        let digest = signing_digest(&args.data, args.hash_to_directly_sign.as_deref())?;

        let counterparty = defaulted(args.counterparty, Counterparty::Anyone);
        let private_key =
            self.key_deriver
                .derive_private(&args.protocol, &args.key_id, &counterparty)?;
        let signature = sign_prehash_der(&private_key, &digest)?;
        Ok(CreateSignatureResult { signature })
    }

    /// Verify an ECDSA signature against the context's derived public key.
    ///
    /// Success is the only `Ok`: a failed check is
    /// [`WalletError::SignatureInvalid`], never `valid: false`.
    pub fn verify_signature(
        &self,
        args: VerifySignatureArgs,
        _originator: &str,
    ) -> Result<VerifySignatureResult, WalletError> {
        let digest = signing_digest(&args.data, args.hash_to_directly_verify.as_deref())?;

        let counterparty = defaulted(args.counterparty, Counterparty::Myself);
        let public_key = self.key_deriver.derive_public(
            &args.protocol,
            &args.key_id,
            &counterparty,
            args.for_self,
        )?;

        if !verify_prehash_der(&public_key, &digest, &args.signature) {
            return Err(WalletError::SignatureInvalid);
        }
        Ok(VerifySignatureResult { valid: true })
    }

    /// HMAC-SHA-256 a message under the context's symmetric key.
    pub fn create_hmac(
        &self,
        args: CreateHmacArgs,
        _originator: &str,
    ) -> Result<CreateHmacResult, WalletError> {
        let counterparty = defaulted(args.counterparty, Counterparty::Myself);
        let key = self
            .key_deriver
            .derive_symmetric(&args.protocol, &args.key_id, &counterparty)?;
        let hmac = hmac_sha256(key.as_bytes(), &args.data);
        Ok(CreateHmacResult { hmac })
    }

    /// Check an HMAC-SHA-256 tag in constant time.
    ///
    /// A mismatch is reported as `valid: false` without an error.
    pub fn verify_hmac(
        &self,
        args: VerifyHmacArgs,
        _originator: &str,
    ) -> Result<VerifyHmacResult, WalletError> {
        let counterparty = defaulted(args.counterparty, Counterparty::Myself);
        let key = self
            .key_deriver
            .derive_symmetric(&args.protocol, &args.key_id, &counterparty)?;
        let valid = verify_hmac_sha256(key.as_bytes(), &args.data, &args.hmac);
        Ok(VerifyHmacResult { valid })
    }
}

impl std::fmt::Debug for ProtoWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtoWallet")
            .field("identity", self.key_deriver.root_public_key())
            .finish_non_exhaustive()
    }
}

/// Substitute the per-operation default for an uninitialised counterparty.
fn defaulted(counterparty: Counterparty, default: Counterparty) -> Counterparty {
    match counterparty {
        Counterparty::Uninitialized => default,
        other => other,
    }
}

/// Resolve the digest to sign or verify: a directly supplied 32-byte hash
/// wins; otherwise SHA-256 of `data`. Both absent is [`WalletError::NoPayload`].
fn signing_digest(data: &[u8], direct_hash: Option<&[u8]>) -> Result<[u8; 32], WalletError> {
    match direct_hash {
        Some(hash) if !hash.is_empty() => hash
            .try_into()
            .map_err(|_| WalletError::HashLengthInvalid(hash.len())),
        _ if data.is_empty() => Err(WalletError::NoPayload),
        _ => Ok(sha256(data)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_prefers_direct_hash() {
        let hash = [7u8; 32];
        let resolved = signing_digest(b"data", Some(&hash)).unwrap();
        assert_eq!(resolved, hash);
    }

    #[test]
    fn digest_hashes_data() {
        assert_eq!(signing_digest(b"data", None).unwrap(), sha256(b"data"));
    }

    #[test]
    fn digest_rejects_empty_payload() {
        assert!(matches!(
            signing_digest(b"", None),
            Err(WalletError::NoPayload)
        ));
        // An empty direct hash does not count as supplied.
        assert!(matches!(
            signing_digest(b"", Some(&[])),
            Err(WalletError::NoPayload)
        ));
    }

    #[test]
    fn digest_rejects_wrong_hash_length() {
        assert!(matches!(
            signing_digest(b"", Some(&[0u8; 31])),
            Err(WalletError::HashLengthInvalid(31))
        ));
    }
}
