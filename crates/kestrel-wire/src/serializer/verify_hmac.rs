//! `verifyHmac` argument and result serializers.

use kestrel_wallet::{VerifyHmacArgs, VerifyHmacResult};

use super::key_params::{decode_key_params, encode_key_params};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Encode `verifyHmac` arguments.
pub fn serialize_verify_hmac_args(args: &VerifyHmacArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    writer.write_varint_bytes(&args.data);
    writer.write_bytes(&args.hmac);
    writer.into_bytes()
}

/// Decode `verifyHmac` arguments.
pub fn deserialize_verify_hmac_args(data: &[u8]) -> Result<VerifyHmacArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;
    let data = reader.read_varint_bytes()?;
    let hmac = reader.read_array::<32>()?;
    reader.expect_end()?;
    Ok(VerifyHmacArgs {
        protocol,
        key_id,
        counterparty,
        data,
        hmac,
    })
}

/// Encode a `verifyHmac` result: one byte, `1` when the tag matched.
pub fn serialize_verify_hmac_result(result: &VerifyHmacResult) -> Vec<u8> {
    vec![u8::from(result.valid)]
}

/// Decode a `verifyHmac` result.
pub fn deserialize_verify_hmac_result(data: &[u8]) -> Result<VerifyHmacResult, WireError> {
    let mut reader = Reader::new(data);
    let valid = reader.read_byte()? == 1;
    reader.expect_end()?;
    Ok(VerifyHmacResult { valid })
}
