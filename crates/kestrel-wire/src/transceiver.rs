//! Calling side of the wallet wire.

use kestrel_wallet::{
    CreateHmacArgs, CreateHmacResult, CreateSignatureArgs, CreateSignatureResult, DecryptArgs,
    DecryptResult, EncryptArgs, EncryptResult, GetPublicKeyArgs, GetPublicKeyResult,
    VerifyHmacArgs, VerifyHmacResult, VerifySignatureArgs, VerifySignatureResult,
};

use crate::{
    error::WireError,
    frame::{read_result_frame, write_request_frame, Call, RequestFrame, ResultFrame},
    processor::WalletWire,
    serializer,
};

/// Exposes the proto-wallet operation surface over any [`WalletWire`]:
/// each call serialises its arguments, transmits a request frame, and
/// decodes the result frame.
///
/// Error result frames surface as [`WireError::Remote`] with the serving
/// side's code and message.
#[derive(Debug)]
pub struct WalletWireTransceiver<W: WalletWire> {
    wire: W,
}

impl<W: WalletWire> WalletWireTransceiver<W> {
    /// Wrap a wire.
    pub fn new(wire: W) -> Self {
        Self { wire }
    }

    fn transmit(
        &self,
        call: Call,
        originator: &str,
        params: Vec<u8>,
    ) -> Result<Vec<u8>, WireError> {
        let frame = write_request_frame(&RequestFrame {
            call: call as u8,
            originator: originator.to_owned(),
            params,
        })?;
        let response = self.wire.transmit_to_wallet(&frame)?;
        match read_result_frame(&response)? {
            ResultFrame::Success(payload) => Ok(payload),
            ResultFrame::Error(error) => Err(WireError::Remote {
                code: error.code,
                message: error.message,
                stack: error.stack,
            }),
        }
    }

    /// Remote `getPublicKey`.
    pub fn get_public_key(
        &self,
        args: &GetPublicKeyArgs,
        originator: &str,
    ) -> Result<GetPublicKeyResult, WireError> {
        let payload = self.transmit(
            Call::GetPublicKey,
            originator,
            serializer::serialize_get_public_key_args(args),
        )?;
        serializer::deserialize_get_public_key_result(&payload)
    }

    /// Remote `encrypt`.
    pub fn encrypt(&self, args: &EncryptArgs, originator: &str) -> Result<EncryptResult, WireError> {
        let payload = self.transmit(
            Call::Encrypt,
            originator,
            serializer::serialize_encrypt_args(args),
        )?;
        serializer::deserialize_encrypt_result(&payload)
    }

    /// Remote `decrypt`.
    pub fn decrypt(&self, args: &DecryptArgs, originator: &str) -> Result<DecryptResult, WireError> {
        let payload = self.transmit(
            Call::Decrypt,
            originator,
            serializer::serialize_decrypt_args(args),
        )?;
        serializer::deserialize_decrypt_result(&payload)
    }

    /// Remote `createSignature`.
    pub fn create_signature(
        &self,
        args: &CreateSignatureArgs,
        originator: &str,
    ) -> Result<CreateSignatureResult, WireError> {
        let payload = self.transmit(
            Call::CreateSignature,
            originator,
            serializer::serialize_create_signature_args(args),
        )?;
        serializer::deserialize_create_signature_result(&payload)
    }

    /// Remote `verifySignature`.
    pub fn verify_signature(
        &self,
        args: &VerifySignatureArgs,
        originator: &str,
    ) -> Result<VerifySignatureResult, WireError> {
        let payload = self.transmit(
            Call::VerifySignature,
            originator,
            serializer::serialize_verify_signature_args(args),
        )?;
        serializer::deserialize_verify_signature_result(&payload)
    }

    /// Remote `createHmac`.
    pub fn create_hmac(
        &self,
        args: &CreateHmacArgs,
        originator: &str,
    ) -> Result<CreateHmacResult, WireError> {
        let payload = self.transmit(
            Call::CreateHmac,
            originator,
            serializer::serialize_create_hmac_args(args),
        )?;
        serializer::deserialize_create_hmac_result(&payload)
    }

    /// Remote `verifyHmac`.
    pub fn verify_hmac(
        &self,
        args: &VerifyHmacArgs,
        originator: &str,
    ) -> Result<VerifyHmacResult, WireError> {
        let payload = self.transmit(
            Call::VerifyHmac,
            originator,
            serializer::serialize_verify_hmac_args(args),
        )?;
        serializer::deserialize_verify_hmac_result(&payload)
    }
}
