//! Numeric error codes carried in error result frames.
//!
//! Every error kind maps to a stable code in 1..=255 so the calling side
//! can classify failures without parsing messages.

use kestrel_key_deriv::{DerivationError, InvoiceError};
use kestrel_primitives::{AeadError, KeyError};
use kestrel_wallet::WalletError;

use crate::error::WireError;

/// Security level outside 0..=2.
pub const INVALID_SECURITY_LEVEL: u8 = 1;
/// Key ID empty or over 800 bytes.
pub const INVALID_KEY_ID: u8 = 2;
/// Protocol name under 5 bytes.
pub const PROTOCOL_TOO_SHORT: u8 = 3;
/// Protocol name over its cap.
pub const PROTOCOL_TOO_LONG: u8 = 4;
/// Protocol name with consecutive spaces.
pub const DOUBLE_SPACE: u8 = 5;
/// Protocol name with characters outside `[a-z0-9 ]`.
pub const ILLEGAL_CHARACTER: u8 = 6;
/// Protocol name ending in `" protocol"`.
pub const REDUNDANT_SUFFIX: u8 = 7;
/// Derived `get_public_key` without protocol/key ID.
pub const MISSING_CONTEXT: u8 = 8;
/// Signing with neither data nor hash.
pub const NO_PAYLOAD: u8 = 9;
/// Direct hash not 32 bytes.
pub const HASH_LENGTH_INVALID: u8 = 10;
/// Symmetric derivation with the Self counterparty.
pub const SELF_SYMMETRIC_FORBIDDEN: u8 = 11;
/// Zero offset or child scalar in derivation.
pub const DEGENERATE_DERIVATION: u8 = 12;
/// Uninitialised counterparty reached the deriver.
pub const UNINITIALIZED_COUNTERPARTY: u8 = 13;

/// AEAD open failure.
pub const AUTHENTICATION_FAILED: u8 = 20;
/// ECDSA verification failure.
pub const SIGNATURE_INVALID: u8 = 21;
/// AEAD seal failure.
pub const ENCRYPTION_FAILED: u8 = 22;

/// Frame ended early.
pub const TRUNCATED_FRAME: u8 = 30;
/// Bytes after the end of a structure.
pub const TRAILING_BYTES: u8 = 31;
/// Call id not in the table.
pub const UNKNOWN_CALL: u8 = 32;
/// Non-minimal or out-of-range varint.
pub const MALFORMED_VARINT: u8 = 33;
/// Bad optional tag byte.
pub const BAD_OPTIONAL_TAG: u8 = 34;
/// Bad counterparty tag byte.
pub const BAD_COUNTERPARTY_TAG: u8 = 35;
/// Bad data/hash payload selector.
pub const BAD_PAYLOAD_TAG: u8 = 36;
/// Unparseable compressed public key.
pub const INVALID_PUBLIC_KEY: u8 = 37;
/// Invalid UTF-8 in a string field.
pub const INVALID_UTF8: u8 = 38;
/// Originator beyond 255 bytes.
pub const ORIGINATOR_TOO_LONG: u8 = 39;

/// Call recognised by the codec but not served by the proto-wallet.
pub const UNSUPPORTED_CALL: u8 = 254;
/// Anything without a more specific code.
pub const INTERNAL: u8 = 255;

/// Code for a proto-wallet error.
pub fn wallet_error_code(error: &WalletError) -> u8 {
    match error {
        WalletError::MissingContext => MISSING_CONTEXT,
        WalletError::NoPayload => NO_PAYLOAD,
        WalletError::HashLengthInvalid(_) => HASH_LENGTH_INVALID,
        WalletError::SignatureInvalid => SIGNATURE_INVALID,
        WalletError::Derivation(derivation) => match derivation {
            DerivationError::Invoice(invoice) => invoice_error_code(invoice),
            DerivationError::SelfSymmetricForbidden => SELF_SYMMETRIC_FORBIDDEN,
            DerivationError::UninitializedCounterparty => UNINITIALIZED_COUNTERPARTY,
            DerivationError::Key(KeyError::DegenerateDerivation) => DEGENERATE_DERIVATION,
            DerivationError::Key(_) => INTERNAL,
        },
        WalletError::Cipher(AeadError::AuthenticationFailed) => AUTHENTICATION_FAILED,
        WalletError::Cipher(AeadError::EncryptionFailed) => ENCRYPTION_FAILED,
        WalletError::Key(KeyError::DegenerateDerivation) => DEGENERATE_DERIVATION,
        WalletError::Key(_) => INTERNAL,
    }
}

fn invoice_error_code(error: &InvoiceError) -> u8 {
    match error {
        InvoiceError::InvalidSecurityLevel(_) => INVALID_SECURITY_LEVEL,
        InvoiceError::InvalidKeyId(_) => INVALID_KEY_ID,
        InvoiceError::ProtocolTooShort => PROTOCOL_TOO_SHORT,
        InvoiceError::ProtocolTooLong(_) => PROTOCOL_TOO_LONG,
        InvoiceError::DoubleSpace => DOUBLE_SPACE,
        InvoiceError::IllegalCharacter => ILLEGAL_CHARACTER,
        InvoiceError::RedundantSuffix => REDUNDANT_SUFFIX,
    }
}

/// Code for a codec-level error detected while serving a request.
pub fn wire_error_code(error: &WireError) -> u8 {
    match error {
        WireError::TruncatedFrame => TRUNCATED_FRAME,
        WireError::TrailingBytes(_) => TRAILING_BYTES,
        WireError::UnknownCall(_) => UNKNOWN_CALL,
        WireError::MalformedVarint => MALFORMED_VARINT,
        WireError::BadOptionalTag(_) => BAD_OPTIONAL_TAG,
        WireError::BadCounterpartyTag(_) => BAD_COUNTERPARTY_TAG,
        WireError::BadPayloadTag(_) => BAD_PAYLOAD_TAG,
        WireError::InvalidSecurityLevel(_) => INVALID_SECURITY_LEVEL,
        WireError::InvalidPublicKey => INVALID_PUBLIC_KEY,
        WireError::InvalidUtf8 => INVALID_UTF8,
        WireError::OriginatorTooLong(_) => ORIGINATOR_TOO_LONG,
        WireError::Remote { code, .. } => *code,
    }
}
