//! `decrypt` argument and result serializers.

use kestrel_wallet::{DecryptArgs, DecryptResult};

use super::key_params::{decode_key_params, encode_key_params};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Encode `decrypt` arguments.
pub fn serialize_decrypt_args(args: &DecryptArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    writer.write_varint_bytes(&args.ciphertext);
    writer.into_bytes()
}

/// Decode `decrypt` arguments.
pub fn deserialize_decrypt_args(data: &[u8]) -> Result<DecryptArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;
    let ciphertext = reader.read_varint_bytes()?;
    reader.expect_end()?;
    Ok(DecryptArgs {
        protocol,
        key_id,
        counterparty,
        ciphertext,
    })
}

/// Encode a `decrypt` result: the raw plaintext.
pub fn serialize_decrypt_result(result: &DecryptResult) -> Vec<u8> {
    result.plaintext.clone()
}

/// Decode a `decrypt` result.
pub fn deserialize_decrypt_result(data: &[u8]) -> Result<DecryptResult, WireError> {
    Ok(DecryptResult {
        plaintext: data.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use k256::SecretKey;
    use kestrel_key_deriv::{Counterparty, Protocol, SecurityLevel};
    use rand::rngs::OsRng;

    use super::*;

    #[test]
    fn args_round_trip() {
        let args = DecryptArgs {
            protocol: Protocol::new(SecurityLevel::EveryAppAndCounterparty, "test protocol"),
            key_id: "test-key".into(),
            counterparty: Counterparty::Other(SecretKey::random(&mut OsRng).public_key()),
            ciphertext: (0..64).collect(),
        };
        let bytes = serialize_decrypt_args(&args);
        assert_eq!(deserialize_decrypt_args(&bytes).unwrap(), args);
    }

    #[test]
    fn truncated_ciphertext_rejected() {
        let args = DecryptArgs {
            ciphertext: vec![1, 2, 3, 4, 5],
            ..Default::default()
        };
        let bytes = serialize_decrypt_args(&args);
        assert_eq!(
            deserialize_decrypt_args(&bytes[..bytes.len() - 2]),
            Err(WireError::TruncatedFrame)
        );
    }

    #[test]
    fn result_round_trip() {
        let result = DecryptResult {
            plaintext: b"opened".to_vec(),
        };
        let bytes = serialize_decrypt_result(&result);
        assert_eq!(deserialize_decrypt_result(&bytes).unwrap(), result);
    }
}
