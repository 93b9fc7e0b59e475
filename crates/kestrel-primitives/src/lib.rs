//! Cryptographic primitives for the Kestrel wallet SDK.
//!
//! This crate realises the low-level building blocks the rest of the
//! workspace composes:
//!
//! - [`hashes`] — SHA-256/512, HMAC, RIPEMD-160 and the usual compound
//!   digests.
//! - [`keys`] — secp256k1 key helpers: the well-known "anyone" key, ECDH
//!   shared secrets, invoice-labelled child-key derivation, and ECDSA
//!   prehash signing in DER form.
//! - [`aead`] — AES-256-GCM sealing with the 32-byte IV layout used by the
//!   wallet wire compliance vectors.
//!
//! Everything here is pure computation: no I/O, no global state. Secret
//! material is zeroised on drop where the types allow it.

pub mod aead;
pub mod hashes;
pub mod keys;

pub use aead::{AeadError, SymmetricKey};
pub use keys::{
    anyone_public_key, anyone_secret_key, derive_child_public, derive_child_secret,
    shared_secret_x, sign_prehash_der, verify_prehash_der, KeyError,
};
