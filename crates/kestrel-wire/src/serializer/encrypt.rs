//! `encrypt` argument and result serializers.

use kestrel_wallet::{EncryptArgs, EncryptResult};

use super::key_params::{decode_key_params, encode_key_params};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Encode `encrypt` arguments.
pub fn serialize_encrypt_args(args: &EncryptArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    writer.write_varint_bytes(&args.plaintext);
    writer.into_bytes()
}

/// Decode `encrypt` arguments.
pub fn deserialize_encrypt_args(data: &[u8]) -> Result<EncryptArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;
    let plaintext = reader.read_varint_bytes()?;
    reader.expect_end()?;
    Ok(EncryptArgs {
        protocol,
        key_id,
        counterparty,
        plaintext,
    })
}

/// Encode an `encrypt` result: the raw sealed bytes.
pub fn serialize_encrypt_result(result: &EncryptResult) -> Vec<u8> {
    result.ciphertext.clone()
}

/// Decode an `encrypt` result.
pub fn deserialize_encrypt_result(data: &[u8]) -> Result<EncryptResult, WireError> {
    Ok(EncryptResult {
        ciphertext: data.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use kestrel_key_deriv::{Counterparty, Protocol, SecurityLevel};

    use super::*;

    #[test]
    fn args_round_trip() {
        let cases = [
            EncryptArgs {
                protocol: Protocol::new(SecurityLevel::EveryApp, "test protocol"),
                key_id: "test-key".into(),
                counterparty: Counterparty::Myself,
                plaintext: vec![1, 2, 3, 4],
            },
            EncryptArgs {
                protocol: Protocol::new(SecurityLevel::Silent, "minimal"),
                key_id: "min-key".into(),
                counterparty: Counterparty::Uninitialized,
                plaintext: vec![5, 6],
            },
            EncryptArgs {
                protocol: Protocol::new(SecurityLevel::EveryAppAndCounterparty, "no data"),
                key_id: "k".into(),
                counterparty: Counterparty::Anyone,
                plaintext: Vec::new(),
            },
        ];

        for args in cases {
            let bytes = serialize_encrypt_args(&args);
            assert_eq!(deserialize_encrypt_args(&bytes).unwrap(), args);
        }
    }

    #[test]
    fn args_with_trailing_bytes_rejected() {
        let mut bytes = serialize_encrypt_args(&EncryptArgs::default());
        bytes.extend_from_slice(&[1, 2]);
        assert_eq!(
            deserialize_encrypt_args(&bytes),
            Err(WireError::TrailingBytes(2))
        );
    }

    #[test]
    fn result_round_trip() {
        let result = EncryptResult {
            ciphertext: vec![1, 2, 3],
        };
        let bytes = serialize_encrypt_result(&result);
        assert_eq!(deserialize_encrypt_result(&bytes).unwrap(), result);
    }
}
