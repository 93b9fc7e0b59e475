//! Invoice-number construction and validation.
//!
//! The invoice number `"{securityLevel}-{normalisedName}-{keyID}"` is the
//! only domain separator between derivation contexts, so its validation
//! rules are load-bearing: two contexts collide exactly when their invoice
//! numbers are byte-identical.

use crate::types::Protocol;

/// Longest permitted normalised protocol name.
const MAX_NAME_LEN: usize = 400;

/// Names carrying this prefix may run longer, up to [`LINKAGE_MAX_NAME_LEN`]:
/// they embed a counterparty key and protocol reference of their own.
const LINKAGE_PREFIX: &str = "specific linkage revelation ";

/// Length cap for [`LINKAGE_PREFIX`]-prefixed names.
const LINKAGE_MAX_NAME_LEN: usize = 430;

/// Shortest permitted normalised protocol name.
const MIN_NAME_LEN: usize = 5;

/// Key identifiers must be 1..=800 bytes.
const MAX_KEY_ID_LEN: usize = 800;

/// A derivation-context input failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceError {
    /// Security level byte outside 0..=2.
    #[error("protocol security level must be 0, 1, or 2, got {0}")]
    InvalidSecurityLevel(u8),

    /// Key ID empty or longer than 800 bytes.
    #[error("key IDs must be between 1 and 800 bytes, got {0}")]
    InvalidKeyId(usize),

    /// Normalised protocol name shorter than 5 bytes.
    #[error("protocol names must be 5 characters or more")]
    ProtocolTooShort,

    /// Normalised protocol name longer than its cap.
    #[error("protocol names must be {0} characters or less")]
    ProtocolTooLong(usize),

    /// Normalised protocol name contains two consecutive spaces.
    #[error("protocol names cannot contain multiple consecutive spaces")]
    DoubleSpace,

    /// Normalised protocol name contains a character outside `[a-z0-9 ]`.
    #[error("protocol names can only contain letters, numbers and spaces")]
    IllegalCharacter,

    /// Protocol name ends with the redundant suffix `" protocol"`.
    #[error("no need to end a protocol name with \" protocol\"")]
    RedundantSuffix,
}

/// Build the canonical invoice number for `(protocol, key_id)`.
///
/// Validation rules apply in a fixed order; the first violated rule wins.
/// The security-level range rule is enforced by [`SecurityLevel`]'s type
/// (`TryFrom<u8>` at the codec boundary yields
/// [`InvoiceError::InvalidSecurityLevel`]), so this function starts at the
/// key-ID rule.
///
/// [`SecurityLevel`]: crate::SecurityLevel
pub fn compute_invoice_number(protocol: &Protocol, key_id: &str) -> Result<String, InvoiceError> {
    if key_id.is_empty() || key_id.len() > MAX_KEY_ID_LEN {
        return Err(InvoiceError::InvalidKeyId(key_id.len()));
    }

    let name = protocol.name.trim().to_lowercase();

    if name.len() < MIN_NAME_LEN {
        return Err(InvoiceError::ProtocolTooShort);
    }
    let max_len = if name.starts_with(LINKAGE_PREFIX) {
        LINKAGE_MAX_NAME_LEN
    } else {
        MAX_NAME_LEN
    };
    if name.len() > max_len {
        return Err(InvoiceError::ProtocolTooLong(max_len));
    }
    if name.contains("  ") {
        return Err(InvoiceError::DoubleSpace);
    }
    if !name
        .bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b' '))
    {
        return Err(InvoiceError::IllegalCharacter);
    }
    if name.ends_with(" protocol") {
        return Err(InvoiceError::RedundantSuffix);
    }

    Ok(format!(
        "{}-{}-{}",
        protocol.security_level as u8, name, key_id
    ))
}
