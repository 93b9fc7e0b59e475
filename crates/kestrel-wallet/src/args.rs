//! Argument and result structures for the proto-wallet operations.
//!
//! Byte payloads are raw `Vec<u8>` throughout; hex/base64 presentation and
//! the wire sentinels live at the codec boundary, not here.

use k256::PublicKey;
use kestrel_key_deriv::{Counterparty, Protocol};

/// Arguments for [`ProtoWallet::get_public_key`].
///
/// [`ProtoWallet::get_public_key`]: crate::ProtoWallet::get_public_key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPublicKeyArgs {
    /// Derivation protocol. Ignored when `identity_key` is set.
    pub protocol: Protocol,
    /// Derivation key identifier. Ignored when `identity_key` is set.
    pub key_id: String,
    /// Counterparty; defaults to the holder themself.
    pub counterparty: Counterparty,
    /// Derive the holder's own key rather than the counterpart view.
    pub for_self: bool,
    /// Return the root identity key, skipping derivation entirely.
    pub identity_key: bool,
}

/// A derived (or identity) public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPublicKeyResult {
    /// The requested public key.
    pub public_key: PublicKey,
}

/// Arguments for [`ProtoWallet::encrypt`].
///
/// [`ProtoWallet::encrypt`]: crate::ProtoWallet::encrypt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptArgs {
    /// Derivation protocol.
    pub protocol: Protocol,
    /// Derivation key identifier.
    pub key_id: String,
    /// Counterparty; defaults to the holder themself.
    pub counterparty: Counterparty,
    /// Message to seal.
    pub plaintext: Vec<u8>,
}

/// A sealed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptResult {
    /// `iv || ciphertext || tag`.
    pub ciphertext: Vec<u8>,
}

/// Arguments for [`ProtoWallet::decrypt`].
///
/// [`ProtoWallet::decrypt`]: crate::ProtoWallet::decrypt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecryptArgs {
    /// Derivation protocol.
    pub protocol: Protocol,
    /// Derivation key identifier.
    pub key_id: String,
    /// Counterparty; defaults to the holder themself.
    pub counterparty: Counterparty,
    /// Sealed message in the `iv || ciphertext || tag` layout.
    pub ciphertext: Vec<u8>,
}

/// An opened message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptResult {
    /// The recovered plaintext.
    pub plaintext: Vec<u8>,
}

/// Arguments for [`ProtoWallet::create_signature`].
///
/// Exactly one of `data` (hashed with SHA-256 before signing) or
/// `hash_to_directly_sign` (a ready 32-byte digest) must be supplied.
///
/// [`ProtoWallet::create_signature`]: crate::ProtoWallet::create_signature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSignatureArgs {
    /// Derivation protocol.
    pub protocol: Protocol,
    /// Derivation key identifier.
    pub key_id: String,
    /// Counterparty; defaults to anyone.
    pub counterparty: Counterparty,
    /// Message to sign; hashed with SHA-256.
    pub data: Vec<u8>,
    /// Pre-computed 32-byte digest to sign directly.
    pub hash_to_directly_sign: Option<Vec<u8>>,
}

/// A created signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSignatureResult {
    /// DER-encoded ECDSA signature.
    pub signature: Vec<u8>,
}

/// Arguments for [`ProtoWallet::verify_signature`].
///
/// [`ProtoWallet::verify_signature`]: crate::ProtoWallet::verify_signature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifySignatureArgs {
    /// Derivation protocol.
    pub protocol: Protocol,
    /// Derivation key identifier.
    pub key_id: String,
    /// Counterparty; defaults to the holder themself. Note the asymmetry
    /// with signing, which defaults to anyone — deliberate, and relied on
    /// by recorded compliance vectors.
    pub counterparty: Counterparty,
    /// Message that was signed; hashed with SHA-256.
    pub data: Vec<u8>,
    /// Pre-computed 32-byte digest to verify against directly.
    pub hash_to_directly_verify: Option<Vec<u8>>,
    /// DER-encoded ECDSA signature to check.
    pub signature: Vec<u8>,
    /// Verify against the holder's own derived key rather than the
    /// counterpart view.
    pub for_self: bool,
}

/// Outcome of signature verification.
///
/// Only ever constructed with `valid: true`; failures surface as
/// [`WalletError::SignatureInvalid`] instead.
///
/// [`WalletError::SignatureInvalid`]: crate::WalletError::SignatureInvalid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySignatureResult {
    /// Whether the signature verified.
    pub valid: bool,
}

/// Arguments for [`ProtoWallet::create_hmac`].
///
/// [`ProtoWallet::create_hmac`]: crate::ProtoWallet::create_hmac
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateHmacArgs {
    /// Derivation protocol.
    pub protocol: Protocol,
    /// Derivation key identifier.
    pub key_id: String,
    /// Counterparty; defaults to the holder themself.
    pub counterparty: Counterparty,
    /// Message to authenticate.
    pub data: Vec<u8>,
}

/// A created message-authentication code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHmacResult {
    /// HMAC-SHA-256 tag.
    pub hmac: [u8; 32],
}

/// Arguments for [`ProtoWallet::verify_hmac`].
///
/// [`ProtoWallet::verify_hmac`]: crate::ProtoWallet::verify_hmac
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyHmacArgs {
    /// Derivation protocol.
    pub protocol: Protocol,
    /// Derivation key identifier.
    pub key_id: String,
    /// Counterparty; defaults to the holder themself.
    pub counterparty: Counterparty,
    /// Message that was authenticated.
    pub data: Vec<u8>,
    /// Tag to check.
    pub hmac: [u8; 32],
}

/// Outcome of HMAC verification. A mismatch is `valid: false`, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyHmacResult {
    /// Whether the tag matched.
    pub valid: bool,
}
