//! Shared derivation-context types.

use k256::PublicKey;

use crate::invoice::InvoiceError;

/// How strictly an outer host should confirm use of a protocol with the
/// user. Opaque to the derivation core; carried verbatim in the invoice
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum SecurityLevel {
    /// No confirmation required.
    #[default]
    Silent = 0,
    /// Confirm once per app.
    EveryApp = 1,
    /// Confirm per app and counterparty.
    EveryAppAndCounterparty = 2,
}

impl TryFrom<u8> for SecurityLevel {
    type Error = InvoiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Silent),
            1 => Ok(Self::EveryApp),
            2 => Ok(Self::EveryAppAndCounterparty),
            other => Err(InvoiceError::InvalidSecurityLevel(other)),
        }
    }
}

/// A protocol descriptor scoping a derivation context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Protocol {
    /// Confirmation strictness, 0..=2.
    pub security_level: SecurityLevel,
    /// Protocol name; normalised (trimmed, lower-cased) before hashing.
    pub name: String,
}

impl Protocol {
    /// Convenience constructor.
    pub fn new(security_level: SecurityLevel, name: impl Into<String>) -> Self {
        Self {
            security_level,
            name: name.into(),
        }
    }
}

/// The other party in a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Counterparty {
    /// Not supplied; each wallet operation substitutes its own default.
    #[default]
    Uninitialized,
    /// The public at large. Resolves to the curve generator `G`.
    Anyone,
    /// The holder's own identity. Resolves to the root public key.
    Myself,
    /// A specific counterparty.
    Other(PublicKey),
}
