//! Request and result framing.
//!
//! A request frame is a call id, a length-prefixed originator domain and
//! the op-specific parameter bytes. A result frame is a status byte: zero
//! followed by the raw result payload, or a nonzero error code followed by
//! varint-delimited message and stack-trace strings.

use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Wallet-wire call identifiers.
///
/// The numbering follows the published substrate table so frames
/// interoperate with the reference SDKs; ids the core does not serve are
/// still recognised by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Call {
    /// Create a transaction action (codec-only in this crate).
    CreateAction = 1,
    /// Return an identity or derived public key.
    GetPublicKey = 8,
    /// Seal a message.
    Encrypt = 11,
    /// Open a sealed message.
    Decrypt = 12,
    /// Compute an HMAC.
    CreateHmac = 13,
    /// Check an HMAC.
    VerifyHmac = 14,
    /// Create an ECDSA signature.
    CreateSignature = 15,
    /// Verify an ECDSA signature.
    VerifySignature = 16,
}

impl TryFrom<u8> for Call {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::CreateAction),
            8 => Ok(Self::GetPublicKey),
            11 => Ok(Self::Encrypt),
            12 => Ok(Self::Decrypt),
            13 => Ok(Self::CreateHmac),
            14 => Ok(Self::VerifyHmac),
            15 => Ok(Self::CreateSignature),
            16 => Ok(Self::VerifySignature),
            other => Err(WireError::UnknownCall(other)),
        }
    }
}

/// A decoded request frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    /// Raw call id; [`Call::try_from`] classifies it.
    pub call: u8,
    /// Originator domain, UTF-8, at most 255 bytes.
    pub originator: String,
    /// Op-specific parameter bytes.
    pub params: Vec<u8>,
}

/// Encode a request frame.
pub fn write_request_frame(frame: &RequestFrame) -> Result<Vec<u8>, WireError> {
    let originator = frame.originator.as_bytes();
    if originator.len() > u8::MAX as usize {
        return Err(WireError::OriginatorTooLong(originator.len()));
    }

    let mut writer = Writer::new();
    writer.write_byte(frame.call);
    writer.write_byte(originator.len() as u8);
    writer.write_bytes(originator);
    writer.write_bytes(&frame.params);
    Ok(writer.into_bytes())
}

/// Decode a request frame. The parameter bytes are everything after the
/// originator; their validation belongs to the per-op serializers.
pub fn read_request_frame(data: &[u8]) -> Result<RequestFrame, WireError> {
    let mut reader = Reader::new(data);
    let call = reader.read_byte()?;
    let originator_len = reader.read_byte()? as usize;
    let originator = String::from_utf8(reader.read_bytes(originator_len)?.to_vec())
        .map_err(|_| WireError::InvalidUtf8)?;
    let params = reader.read_remaining().to_vec();
    Ok(RequestFrame {
        call,
        originator,
        params,
    })
}

/// Error payload of a result frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultError {
    /// Numeric error code, 1..=255.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Stack trace; empty when the serving side has none to offer.
    pub stack: String,
}

/// Outcome carried by a result frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultFrame {
    /// Success: the op-specific result payload.
    Success(Vec<u8>),
    /// Failure: code plus diagnostics.
    Error(ResultError),
}

/// Encode a result frame.
pub fn write_result_frame(outcome: &ResultFrame) -> Vec<u8> {
    let mut writer = Writer::new();
    match outcome {
        ResultFrame::Success(payload) => {
            writer.write_byte(0);
            writer.write_bytes(payload);
        }
        ResultFrame::Error(error) => {
            // A zero code would read as success; clamp to the generic code.
            writer.write_byte(if error.code == 0 { 0xFF } else { error.code });
            writer.write_string(&error.message);
            writer.write_string(&error.stack);
        }
    }
    writer.into_bytes()
}

/// Decode a result frame.
pub fn read_result_frame(data: &[u8]) -> Result<ResultFrame, WireError> {
    let mut reader = Reader::new(data);
    let status = reader.read_byte()?;
    if status == 0 {
        return Ok(ResultFrame::Success(reader.read_remaining().to_vec()));
    }

    let message = reader.read_string()?;
    let stack = reader.read_string()?;
    reader.expect_end()?;
    Ok(ResultFrame::Error(ResultError {
        code: status,
        message,
        stack,
    }))
}
