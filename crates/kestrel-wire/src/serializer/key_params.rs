//! Encoding of the key-related parameter block shared by every operation:
//! protocol, key ID and counterparty.

use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use kestrel_key_deriv::{Counterparty, Protocol, SecurityLevel};

use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

const TAG_UNINITIALIZED: u8 = 0;
const TAG_ANYONE: u8 = 1;
const TAG_SELF: u8 = 2;
const TAG_OTHER: u8 = 3;

pub(crate) fn encode_key_params(
    writer: &mut Writer,
    protocol: &Protocol,
    key_id: &str,
    counterparty: &Counterparty,
) {
    writer.write_byte(protocol.security_level as u8);
    writer.write_string(&protocol.name);
    writer.write_string(key_id);
    encode_counterparty(writer, counterparty);
}

pub(crate) fn decode_key_params(
    reader: &mut Reader<'_>,
) -> Result<(Protocol, String, Counterparty), WireError> {
    let level = reader.read_byte()?;
    let security_level =
        SecurityLevel::try_from(level).map_err(|_| WireError::InvalidSecurityLevel(level))?;
    let name = reader.read_string()?;
    let key_id = reader.read_string()?;
    let counterparty = decode_counterparty(reader)?;
    Ok((
        Protocol {
            security_level,
            name,
        },
        key_id,
        counterparty,
    ))
}

pub(crate) fn encode_counterparty(writer: &mut Writer, counterparty: &Counterparty) {
    match counterparty {
        Counterparty::Uninitialized => writer.write_byte(TAG_UNINITIALIZED),
        Counterparty::Anyone => writer.write_byte(TAG_ANYONE),
        Counterparty::Myself => writer.write_byte(TAG_SELF),
        Counterparty::Other(key) => {
            writer.write_byte(TAG_OTHER);
            writer.write_bytes(key.to_encoded_point(true).as_bytes());
        }
    }
}

pub(crate) fn decode_counterparty(reader: &mut Reader<'_>) -> Result<Counterparty, WireError> {
    match reader.read_byte()? {
        TAG_UNINITIALIZED => Ok(Counterparty::Uninitialized),
        TAG_ANYONE => Ok(Counterparty::Anyone),
        TAG_SELF => Ok(Counterparty::Myself),
        TAG_OTHER => {
            let bytes = reader.read_bytes(33)?;
            let key = PublicKey::from_sec1_bytes(bytes).map_err(|_| WireError::InvalidPublicKey)?;
            Ok(Counterparty::Other(key))
        }
        other => Err(WireError::BadCounterpartyTag(other)),
    }
}
