//! The proto-wallet: foundational cryptographic operations.
//!
//! A [`ProtoWallet`] is a precursor to a full wallet. It derives keys,
//! creates and verifies signatures, encrypts and decrypts, and computes
//! HMACs — all scoped by `(protocol, keyID, counterparty)` tuples. Unlike a
//! full wallet it builds no transactions, tracks no outputs, talks to no
//! chain and stores nothing.
//!
//! Every operation is atomic from the caller's viewpoint and the wallet
//! itself holds no mutable state, so any number of threads may call into it
//! concurrently; the only shared resource is the derivation cache, which
//! serialises internally.

mod args;
mod error;
mod proto_wallet;

pub use args::{
    CreateHmacArgs, CreateHmacResult, CreateSignatureArgs, CreateSignatureResult, DecryptArgs,
    DecryptResult, EncryptArgs, EncryptResult, GetPublicKeyArgs, GetPublicKeyResult,
    VerifyHmacArgs, VerifyHmacResult, VerifySignatureArgs, VerifySignatureResult,
};
pub use error::WalletError;
pub use proto_wallet::ProtoWallet;
