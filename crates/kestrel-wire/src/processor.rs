//! Serving side of the wallet wire.

use kestrel_wallet::{ProtoWallet, WalletError};
use tracing::{debug, warn};

use crate::{
    codes::{self, wallet_error_code, wire_error_code},
    error::WireError,
    frame::{read_request_frame, write_result_frame, Call, RequestFrame, ResultError, ResultFrame},
    serializer,
};

/// A byte-in, byte-out wallet transport. Implementations deliver whole
/// request frames and return whole result frames; the surrounding transport
/// (pipe, socket, message channel) is the caller's business.
pub trait WalletWire {
    /// Process one request frame and produce its result frame.
    fn transmit_to_wallet(&self, message: &[u8]) -> Result<Vec<u8>, WireError>;
}

/// Serves a [`ProtoWallet`] over the wallet wire.
///
/// Structurally unreadable requests (truncated frame, unknown call id) fail
/// the transmit itself; everything downstream — argument decoding and the
/// wallet operation — is answered with an error result frame carrying a
/// numeric code and message, so a remote caller sees the failure.
#[derive(Debug)]
pub struct WalletWireProcessor {
    wallet: ProtoWallet,
}

impl WalletWireProcessor {
    /// Serve the given wallet.
    pub fn new(wallet: ProtoWallet) -> Self {
        Self { wallet }
    }

    fn process(&self, call: Call, frame: &RequestFrame) -> Result<Vec<u8>, ResultError> {
        let originator = frame.originator.as_str();
        let params = frame.params.as_slice();

        match call {
            Call::GetPublicKey => {
                let args =
                    serializer::deserialize_get_public_key_args(params).map_err(decode_error)?;
                let result = self
                    .wallet
                    .get_public_key(args, originator)
                    .map_err(op_error)?;
                Ok(serializer::serialize_get_public_key_result(&result))
            }
            Call::Encrypt => {
                let args = serializer::deserialize_encrypt_args(params).map_err(decode_error)?;
                let result = self.wallet.encrypt(args, originator).map_err(op_error)?;
                Ok(serializer::serialize_encrypt_result(&result))
            }
            Call::Decrypt => {
                let args = serializer::deserialize_decrypt_args(params).map_err(decode_error)?;
                let result = self.wallet.decrypt(args, originator).map_err(op_error)?;
                Ok(serializer::serialize_decrypt_result(&result))
            }
            Call::CreateSignature => {
                let args =
                    serializer::deserialize_create_signature_args(params).map_err(decode_error)?;
                let result = self
                    .wallet
                    .create_signature(args, originator)
                    .map_err(op_error)?;
                Ok(serializer::serialize_create_signature_result(&result))
            }
            Call::VerifySignature => {
                let args =
                    serializer::deserialize_verify_signature_args(params).map_err(decode_error)?;
                let result = self
                    .wallet
                    .verify_signature(args, originator)
                    .map_err(op_error)?;
                Ok(serializer::serialize_verify_signature_result(&result))
            }
            Call::CreateHmac => {
                let args =
                    serializer::deserialize_create_hmac_args(params).map_err(decode_error)?;
                let result = self.wallet.create_hmac(args, originator).map_err(op_error)?;
                Ok(serializer::serialize_create_hmac_result(&result))
            }
            Call::VerifyHmac => {
                let args =
                    serializer::deserialize_verify_hmac_args(params).map_err(decode_error)?;
                let result = self.wallet.verify_hmac(args, originator).map_err(op_error)?;
                Ok(serializer::serialize_verify_hmac_result(&result))
            }
            Call::CreateAction => Err(ResultError {
                code: codes::UNSUPPORTED_CALL,
                message: "createAction is not served by the proto-wallet".into(),
                stack: String::new(),
            }),
        }
    }
}

impl WalletWire for WalletWireProcessor {
    fn transmit_to_wallet(&self, message: &[u8]) -> Result<Vec<u8>, WireError> {
        let frame = read_request_frame(message)?;
        let call = Call::try_from(frame.call)?;
        debug!(?call, originator = %frame.originator, "dispatching wallet wire call");

        let outcome = match self.process(call, &frame) {
            Ok(payload) => ResultFrame::Success(payload),
            Err(error) => {
                warn!(?call, code = error.code, message = %error.message, "wallet wire call failed");
                ResultFrame::Error(error)
            }
        };
        Ok(write_result_frame(&outcome))
    }
}

fn decode_error(error: WireError) -> ResultError {
    ResultError {
        code: wire_error_code(&error),
        message: error.to_string(),
        stack: String::new(),
    }
}

fn op_error(error: WalletError) -> ResultError {
    ResultError {
        code: wallet_error_code(&error),
        message: error.to_string(),
        stack: String::new(),
    }
}
