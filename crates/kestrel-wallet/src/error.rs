//! Proto-wallet error type.

use kestrel_key_deriv::DerivationError;
use kestrel_primitives::{AeadError, KeyError};

/// Error from a proto-wallet operation.
///
/// Nothing is retried or recovered locally; every failure bubbles out of
/// the operation it occurred in.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// `get_public_key` without `identity_key` needs a protocol name and a
    /// key ID.
    #[error("protocol and keyID are required when identityKey is not set")]
    MissingContext,

    /// Signing/verification needs either data or a direct hash.
    #[error("either data or a direct hash must be provided")]
    NoPayload,

    /// A directly supplied hash was not 32 bytes.
    #[error("direct hash must be exactly 32 bytes, got {0}")]
    HashLengthInvalid(usize),

    /// The signature did not verify. Surfaced as an error rather than a
    /// `false` result: callers treat "no error" as "valid".
    #[error("signature is not valid")]
    SignatureInvalid,

    /// Key derivation failed.
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    /// Symmetric sealing failed; wrong protocol, key ID and counterparty
    /// all manifest here as authentication failure.
    #[error(transparent)]
    Cipher(#[from] AeadError),

    /// ECDSA signing failed.
    #[error(transparent)]
    Key(#[from] KeyError),
}
