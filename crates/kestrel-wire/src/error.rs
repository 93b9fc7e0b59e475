//! Wire codec error type.

/// Error while encoding, decoding or transmitting wallet-wire frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Ran out of bytes before the frame was complete.
    #[error("unexpected end of frame")]
    TruncatedFrame,

    /// Bytes remained after a fully decoded structure.
    #[error("{0} trailing byte(s) after frame")]
    TrailingBytes(usize),

    /// The request frame's call id is not in the call table.
    #[error("unknown call id {0}")]
    UnknownCall(u8),

    /// A varint was not minimally encoded, or encodes an out-of-range
    /// value for its field.
    #[error("malformed varint")]
    MalformedVarint,

    /// An optional-boolean byte was not `0`, `1` or `0xFF`.
    #[error("invalid optional tag {0:#04x}")]
    BadOptionalTag(u8),

    /// A counterparty tag byte was outside `0..=3`.
    #[error("invalid counterparty tag {0:#04x}")]
    BadCounterpartyTag(u8),

    /// A data/hash payload selector was neither `1` nor `2`.
    #[error("invalid payload tag {0:#04x}")]
    BadPayloadTag(u8),

    /// A security-level byte was outside `0..=2`.
    #[error("invalid security level {0}")]
    InvalidSecurityLevel(u8),

    /// 33 bytes that are not a valid compressed secp256k1 point.
    #[error("invalid public key bytes")]
    InvalidPublicKey,

    /// A wire string was not valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,

    /// An originator name longer than the one-byte length prefix allows.
    #[error("originator must be at most 255 bytes, got {0}")]
    OriginatorTooLong(usize),

    /// The remote wallet answered with an error result frame.
    #[error("wallet error {code}: {message}")]
    Remote {
        /// Numeric error code, 1..=255.
        code: u8,
        /// Human-readable message.
        message: String,
        /// Remote stack trace; may be empty.
        stack: String,
    },
}
