//! `createHmac` argument and result serializers.

use kestrel_wallet::{CreateHmacArgs, CreateHmacResult};

use super::key_params::{decode_key_params, encode_key_params};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Encode `createHmac` arguments.
pub fn serialize_create_hmac_args(args: &CreateHmacArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    writer.write_varint_bytes(&args.data);
    writer.into_bytes()
}

/// Decode `createHmac` arguments.
pub fn deserialize_create_hmac_args(data: &[u8]) -> Result<CreateHmacArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;
    let data = reader.read_varint_bytes()?;
    reader.expect_end()?;
    Ok(CreateHmacArgs {
        protocol,
        key_id,
        counterparty,
        data,
    })
}

/// Encode a `createHmac` result: the raw 32-byte tag.
pub fn serialize_create_hmac_result(result: &CreateHmacResult) -> Vec<u8> {
    result.hmac.to_vec()
}

/// Decode a `createHmac` result.
pub fn deserialize_create_hmac_result(data: &[u8]) -> Result<CreateHmacResult, WireError> {
    let mut reader = Reader::new(data);
    let hmac = reader.read_array::<32>()?;
    reader.expect_end()?;
    Ok(CreateHmacResult { hmac })
}
