//! Per-operation argument and result serializers.
//!
//! Every `serialize_*`/`deserialize_*` pair is symmetric: decoding the
//! encoder's output reproduces the input structure, and unknown tail bytes
//! are an error. Argument fields are varint-delimited; single-payload
//! results are the raw payload bytes, with the frame-level status byte as
//! the only error channel.

pub mod create_action;
pub mod create_hmac;
pub mod create_signature;
pub mod decrypt;
pub mod encrypt;
pub mod get_public_key;
mod key_params;
pub mod verify_hmac;
pub mod verify_signature;

pub use create_action::{
    deserialize_create_action_args, deserialize_create_action_result, serialize_create_action_args,
    serialize_create_action_result,
};
pub use create_hmac::{
    deserialize_create_hmac_args, deserialize_create_hmac_result, serialize_create_hmac_args,
    serialize_create_hmac_result,
};
pub use create_signature::{
    deserialize_create_signature_args, deserialize_create_signature_result,
    serialize_create_signature_args, serialize_create_signature_result,
};
pub use decrypt::{
    deserialize_decrypt_args, deserialize_decrypt_result, serialize_decrypt_args,
    serialize_decrypt_result,
};
pub use encrypt::{
    deserialize_encrypt_args, deserialize_encrypt_result, serialize_encrypt_args,
    serialize_encrypt_result,
};
pub use get_public_key::{
    deserialize_get_public_key_args, deserialize_get_public_key_result,
    serialize_get_public_key_args, serialize_get_public_key_result,
};
pub use verify_hmac::{
    deserialize_verify_hmac_args, deserialize_verify_hmac_result, serialize_verify_hmac_args,
    serialize_verify_hmac_result,
};
pub use verify_signature::{
    deserialize_verify_signature_args, deserialize_verify_signature_result,
    serialize_verify_signature_args, serialize_verify_signature_result,
};
