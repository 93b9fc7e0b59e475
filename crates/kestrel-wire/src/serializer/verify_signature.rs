//! `verifySignature` argument and result serializers.

use kestrel_wallet::{VerifySignatureArgs, VerifySignatureResult};

use super::{
    create_signature::{PAYLOAD_DATA, PAYLOAD_HASH},
    key_params::{decode_key_params, encode_key_params},
};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Encode `verifySignature` arguments.
pub fn serialize_verify_signature_args(args: &VerifySignatureArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    match &args.hash_to_directly_verify {
        Some(hash) => {
            writer.write_byte(PAYLOAD_HASH);
            writer.write_bytes(hash);
        }
        None => {
            writer.write_byte(PAYLOAD_DATA);
            writer.write_varint_bytes(&args.data);
        }
    }
    writer.write_varint_bytes(&args.signature);
    writer.write_optional_bool(Some(args.for_self));
    writer.into_bytes()
}

/// Decode `verifySignature` arguments.
pub fn deserialize_verify_signature_args(data: &[u8]) -> Result<VerifySignatureArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;

    let mut args = VerifySignatureArgs {
        protocol,
        key_id,
        counterparty,
        ..Default::default()
    };
    match reader.read_byte()? {
        PAYLOAD_DATA => args.data = reader.read_varint_bytes()?,
        PAYLOAD_HASH => args.hash_to_directly_verify = Some(reader.read_bytes(32)?.to_vec()),
        other => return Err(WireError::BadPayloadTag(other)),
    }
    args.signature = reader.read_varint_bytes()?;
    args.for_self = reader.read_optional_bool()?.unwrap_or(false);
    reader.expect_end()?;
    Ok(args)
}

/// Encode a `verifySignature` result: one byte, `1` when valid.
pub fn serialize_verify_signature_result(result: &VerifySignatureResult) -> Vec<u8> {
    vec![u8::from(result.valid)]
}

/// Decode a `verifySignature` result.
pub fn deserialize_verify_signature_result(
    data: &[u8],
) -> Result<VerifySignatureResult, WireError> {
    let mut reader = Reader::new(data);
    let valid = reader.read_byte()? == 1;
    reader.expect_end()?;
    Ok(VerifySignatureResult { valid })
}

#[cfg(test)]
mod tests {
    use k256::SecretKey;
    use kestrel_key_deriv::{Counterparty, Protocol, SecurityLevel};
    use rand::rngs::OsRng;

    use super::*;

    #[test]
    fn args_round_trip() {
        let cases = [
            VerifySignatureArgs {
                protocol: Protocol::new(SecurityLevel::EveryAppAndCounterparty, "verify"),
                key_id: "sig-key".into(),
                counterparty: Counterparty::Other(SecretKey::random(&mut OsRng).public_key()),
                data: b"signed message".to_vec(),
                hash_to_directly_verify: None,
                signature: vec![0x30, 0x01, 0x02],
                for_self: true,
            },
            VerifySignatureArgs {
                protocol: Protocol::new(SecurityLevel::Silent, "verify"),
                key_id: "k".into(),
                counterparty: Counterparty::Myself,
                data: Vec::new(),
                hash_to_directly_verify: Some(vec![9u8; 32]),
                signature: vec![0x30],
                for_self: false,
            },
        ];

        for args in cases {
            let bytes = serialize_verify_signature_args(&args);
            assert_eq!(deserialize_verify_signature_args(&bytes).unwrap(), args);
        }
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = serialize_verify_signature_args(&VerifySignatureArgs::default());
        bytes.push(1);
        assert_eq!(
            deserialize_verify_signature_args(&bytes),
            Err(WireError::TrailingBytes(1))
        );
    }

    #[test]
    fn result_round_trip() {
        for valid in [true, false] {
            let result = VerifySignatureResult { valid };
            let bytes = serialize_verify_signature_result(&result);
            assert_eq!(
                deserialize_verify_signature_result(&bytes).unwrap(),
                result
            );
        }
    }
}
