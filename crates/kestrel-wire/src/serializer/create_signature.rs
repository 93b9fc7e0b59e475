//! `createSignature` argument and result serializers.

use kestrel_wallet::{CreateSignatureArgs, CreateSignatureResult};

use super::key_params::{decode_key_params, encode_key_params};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Payload selector: message data follows, varint-delimited.
pub(crate) const PAYLOAD_DATA: u8 = 1;
/// Payload selector: a raw 32-byte digest follows.
pub(crate) const PAYLOAD_HASH: u8 = 2;

/// Encode `createSignature` arguments. A directly supplied digest wins the
/// payload slot, mirroring the operation's own precedence.
pub fn serialize_create_signature_args(args: &CreateSignatureArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    match &args.hash_to_directly_sign {
        Some(hash) => {
            writer.write_byte(PAYLOAD_HASH);
            writer.write_bytes(hash);
        }
        None => {
            writer.write_byte(PAYLOAD_DATA);
            writer.write_varint_bytes(&args.data);
        }
    }
    writer.into_bytes()
}

/// Decode `createSignature` arguments.
pub fn deserialize_create_signature_args(data: &[u8]) -> Result<CreateSignatureArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;

    let mut args = CreateSignatureArgs {
        protocol,
        key_id,
        counterparty,
        ..Default::default()
    };
    match reader.read_byte()? {
        PAYLOAD_DATA => args.data = reader.read_varint_bytes()?,
        PAYLOAD_HASH => args.hash_to_directly_sign = Some(reader.read_bytes(32)?.to_vec()),
        other => return Err(WireError::BadPayloadTag(other)),
    }
    reader.expect_end()?;
    Ok(args)
}

/// Encode a `createSignature` result: the raw DER signature.
pub fn serialize_create_signature_result(result: &CreateSignatureResult) -> Vec<u8> {
    result.signature.clone()
}

/// Decode a `createSignature` result.
pub fn deserialize_create_signature_result(
    data: &[u8],
) -> Result<CreateSignatureResult, WireError> {
    Ok(CreateSignatureResult {
        signature: data.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use kestrel_key_deriv::{Counterparty, Protocol, SecurityLevel};

    use super::*;

    #[test]
    fn args_round_trip_with_data() {
        let args = CreateSignatureArgs {
            protocol: Protocol::new(SecurityLevel::EveryAppAndCounterparty, "signing"),
            key_id: "sig-key".into(),
            counterparty: Counterparty::Anyone,
            data: b"message to sign".to_vec(),
            hash_to_directly_sign: None,
        };
        let bytes = serialize_create_signature_args(&args);
        assert_eq!(deserialize_create_signature_args(&bytes).unwrap(), args);
    }

    #[test]
    fn args_round_trip_with_direct_hash() {
        let args = CreateSignatureArgs {
            protocol: Protocol::new(SecurityLevel::EveryApp, "signing"),
            key_id: "sig-key".into(),
            counterparty: Counterparty::Uninitialized,
            data: Vec::new(),
            hash_to_directly_sign: Some(vec![7u8; 32]),
        };
        let bytes = serialize_create_signature_args(&args);
        assert_eq!(deserialize_create_signature_args(&bytes).unwrap(), args);
    }

    #[test]
    fn bad_payload_tag_rejected() {
        let mut writer = Writer::new();
        encode_key_params(
            &mut writer,
            &Protocol::new(SecurityLevel::Silent, "signing"),
            "k",
            &Counterparty::Anyone,
        );
        writer.write_byte(9);
        assert_eq!(
            deserialize_create_signature_args(&writer.into_bytes()),
            Err(WireError::BadPayloadTag(9))
        );
    }

    #[test]
    fn result_round_trip() {
        let result = CreateSignatureResult {
            signature: vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        };
        let bytes = serialize_create_signature_result(&result);
        assert_eq!(
            deserialize_create_signature_result(&bytes).unwrap(),
            result
        );
    }
}
