//! Length-delimited binary framing for the wallet wire.
//!
//! The wire tunnels proto-wallet (and surrounding wallet) calls over any
//! byte-stream transport that delivers whole frames:
//!
//! - [`buf`] — varint reader/writer and the optional-field sentinels.
//! - [`frame`] — request and result frames, and the call-id table.
//! - [`serializer`] — symmetric per-operation argument/result codecs.
//! - [`codes`] — numeric error codes for error result frames.
//! - [`WalletWireProcessor`] — serves a [`ProtoWallet`] behind the wire.
//! - [`WalletWireTransceiver`] — calls a wallet through the wire.
//!
//! Every codec is round-trip symmetric, and unknown tail bytes are an
//! error: a frame either parses exactly or not at all.
//!
//! [`ProtoWallet`]: kestrel_wallet::ProtoWallet

pub mod buf;
pub mod codes;
mod error;
pub mod frame;
mod processor;
pub mod serializer;
mod transceiver;

pub use error::WireError;
pub use frame::{Call, RequestFrame, ResultError, ResultFrame};
pub use processor::{WalletWire, WalletWireProcessor};
pub use serializer::create_action::{
    ActionStatus, CreateActionArgs, CreateActionInput, CreateActionOptions, CreateActionOutput,
    CreateActionResult, Outpoint, SendWithResult, SignableTransaction, TrustSelf,
};
pub use transceiver::WalletWireTransceiver;
