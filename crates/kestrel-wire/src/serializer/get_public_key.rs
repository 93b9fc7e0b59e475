//! `getPublicKey` argument and result serializers.

use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use kestrel_wallet::{GetPublicKeyArgs, GetPublicKeyResult};

use super::key_params::{decode_key_params, encode_key_params};
use crate::{
    buf::{Reader, Writer},
    error::WireError,
};

/// Encode `getPublicKey` arguments.
pub fn serialize_get_public_key_args(args: &GetPublicKeyArgs) -> Vec<u8> {
    let mut writer = Writer::new();
    encode_key_params(&mut writer, &args.protocol, &args.key_id, &args.counterparty);
    writer.write_optional_bool(Some(args.for_self));
    writer.write_optional_bool(Some(args.identity_key));
    writer.into_bytes()
}

/// Decode `getPublicKey` arguments. Absent booleans decode as `false`, the
/// operations' defaults.
pub fn deserialize_get_public_key_args(data: &[u8]) -> Result<GetPublicKeyArgs, WireError> {
    let mut reader = Reader::new(data);
    let (protocol, key_id, counterparty) = decode_key_params(&mut reader)?;
    let for_self = reader.read_optional_bool()?.unwrap_or(false);
    let identity_key = reader.read_optional_bool()?.unwrap_or(false);
    reader.expect_end()?;
    Ok(GetPublicKeyArgs {
        protocol,
        key_id,
        counterparty,
        for_self,
        identity_key,
    })
}

/// Encode a `getPublicKey` result: the 33-byte compressed point.
pub fn serialize_get_public_key_result(result: &GetPublicKeyResult) -> Vec<u8> {
    result.public_key.to_encoded_point(true).as_bytes().to_vec()
}

/// Decode a `getPublicKey` result.
pub fn deserialize_get_public_key_result(data: &[u8]) -> Result<GetPublicKeyResult, WireError> {
    let mut reader = Reader::new(data);
    let bytes = reader.read_bytes(33)?;
    reader.expect_end()?;
    let public_key = PublicKey::from_sec1_bytes(bytes).map_err(|_| WireError::InvalidPublicKey)?;
    Ok(GetPublicKeyResult { public_key })
}
