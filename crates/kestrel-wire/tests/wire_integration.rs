//! Transceiver-over-processor round trips: the full encode → frame →
//! dispatch → frame → decode path, in process.

use k256::SecretKey;
use kestrel_key_deriv::{Counterparty, Protocol, SecurityLevel};
use kestrel_wallet::{
    CreateHmacArgs, CreateSignatureArgs, DecryptArgs, EncryptArgs, GetPublicKeyArgs, ProtoWallet,
    VerifyHmacArgs, VerifySignatureArgs,
};
use kestrel_wire::{
    codes, Call, RequestFrame, WalletWire, WalletWireProcessor, WalletWireTransceiver, WireError,
};
use rand::rngs::OsRng;

fn tests_protocol() -> Protocol {
    Protocol::new(SecurityLevel::EveryAppAndCounterparty, "integration")
}

/// A transceiver talking to an in-process wallet.
fn wired_wallet(root: SecretKey) -> WalletWireTransceiver<WalletWireProcessor> {
    WalletWireTransceiver::new(WalletWireProcessor::new(ProtoWallet::new(root)))
}

#[test]
fn encrypt_and_decrypt_through_the_wire() {
    let user_key = SecretKey::random(&mut OsRng);
    let counterparty_key = SecretKey::random(&mut OsRng);
    let user = wired_wallet(user_key.clone());
    let counterparty = wired_wallet(counterparty_key.clone());

    let plaintext = b"wire round trip".to_vec();
    let sealed = user
        .encrypt(
            &EncryptArgs {
                protocol: tests_protocol(),
                key_id: "1".into(),
                counterparty: Counterparty::Other(counterparty_key.public_key()),
                plaintext: plaintext.clone(),
            },
            "example.com",
        )
        .unwrap();

    let opened = counterparty
        .decrypt(
            &DecryptArgs {
                protocol: tests_protocol(),
                key_id: "1".into(),
                counterparty: Counterparty::Other(user_key.public_key()),
                ciphertext: sealed.ciphertext,
            },
            "example.com",
        )
        .unwrap();

    assert_eq!(opened.plaintext, plaintext);
}

#[test]
fn sign_and_verify_through_the_wire() {
    let user_key = SecretKey::random(&mut OsRng);
    let counterparty_key = SecretKey::random(&mut OsRng);
    let user = wired_wallet(user_key.clone());
    let counterparty = wired_wallet(counterparty_key.clone());

    let signed = user
        .create_signature(
            &CreateSignatureArgs {
                protocol: tests_protocol(),
                key_id: "1".into(),
                counterparty: Counterparty::Other(counterparty_key.public_key()),
                data: b"signed over the wire".to_vec(),
                hash_to_directly_sign: None,
            },
            "",
        )
        .unwrap();

    let verified = counterparty
        .verify_signature(
            &VerifySignatureArgs {
                protocol: tests_protocol(),
                key_id: "1".into(),
                counterparty: Counterparty::Other(user_key.public_key()),
                data: b"signed over the wire".to_vec(),
                hash_to_directly_verify: None,
                signature: signed.signature,
                for_self: false,
            },
            "",
        )
        .unwrap();
    assert!(verified.valid);
}

#[test]
fn hmac_through_the_wire() {
    let root = SecretKey::random(&mut OsRng);
    let wallet = wired_wallet(root.clone());
    let own_key = Counterparty::Other(root.public_key());

    let created = wallet
        .create_hmac(
            &CreateHmacArgs {
                protocol: tests_protocol(),
                key_id: "1".into(),
                counterparty: own_key.clone(),
                data: b"mac me".to_vec(),
            },
            "",
        )
        .unwrap();

    let verified = wallet
        .verify_hmac(
            &VerifyHmacArgs {
                protocol: tests_protocol(),
                key_id: "1".into(),
                counterparty: own_key,
                data: b"mac me".to_vec(),
                hmac: created.hmac,
            },
            "",
        )
        .unwrap();
    assert!(verified.valid);
}

#[test]
fn identity_key_through_the_wire() {
    let root = SecretKey::random(&mut OsRng);
    let wallet = wired_wallet(root.clone());

    let result = wallet
        .get_public_key(
            &GetPublicKeyArgs {
                identity_key: true,
                ..Default::default()
            },
            "",
        )
        .unwrap();
    assert_eq!(result.public_key, root.public_key());
}

// Wallet failures must cross the wire as coded error frames.
#[test]
fn remote_errors_carry_codes_and_messages() {
    let wallet = wired_wallet(SecretKey::random(&mut OsRng));

    let error = wallet
        .encrypt(
            &EncryptArgs {
                protocol: Protocol::new(SecurityLevel::Silent, "x"),
                key_id: "1".into(),
                counterparty: Counterparty::Anyone,
                plaintext: vec![1],
            },
            "",
        )
        .unwrap_err();

    match error {
        WireError::Remote {
            code,
            message,
            stack,
        } => {
            assert_eq!(code, codes::PROTOCOL_TOO_SHORT);
            assert!(message.contains("5 characters or more"), "got {message:?}");
            assert!(stack.is_empty());
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn missing_context_error_through_the_wire() {
    let wallet = wired_wallet(SecretKey::random(&mut OsRng));
    let error = wallet
        .get_public_key(&GetPublicKeyArgs::default(), "")
        .unwrap_err();
    assert!(matches!(
        error,
        WireError::Remote {
            code: codes::MISSING_CONTEXT,
            ..
        }
    ));
}

#[test]
fn unknown_call_fails_the_transmit() {
    let processor = WalletWireProcessor::new(ProtoWallet::new(SecretKey::random(&mut OsRng)));
    let frame = kestrel_wire::frame::write_request_frame(&RequestFrame {
        call: 200,
        originator: String::new(),
        params: Vec::new(),
    })
    .unwrap();
    assert_eq!(
        processor.transmit_to_wallet(&frame),
        Err(WireError::UnknownCall(200))
    );
}

#[test]
fn empty_message_fails_the_transmit() {
    let processor = WalletWireProcessor::new(ProtoWallet::new(SecretKey::random(&mut OsRng)));
    assert_eq!(
        processor.transmit_to_wallet(&[]),
        Err(WireError::TruncatedFrame)
    );
}

// A recognised call the proto-wallet does not serve is answered with an
// error frame, not a transmit failure.
#[test]
fn unserved_call_returns_unsupported_code() {
    let processor = WalletWireProcessor::new(ProtoWallet::new(SecretKey::random(&mut OsRng)));
    let frame = kestrel_wire::frame::write_request_frame(&RequestFrame {
        call: Call::CreateAction as u8,
        originator: String::new(),
        params: kestrel_wire::serializer::serialize_create_action_args(&Default::default()),
    })
    .unwrap();

    let response = processor.transmit_to_wallet(&frame).unwrap();
    match kestrel_wire::frame::read_result_frame(&response).unwrap() {
        kestrel_wire::ResultFrame::Error(error) => {
            assert_eq!(error.code, codes::UNSUPPORTED_CALL);
        }
        other => panic!("expected error frame, got {other:?}"),
    }
}

// Malformed params are answered with a coded error frame.
#[test]
fn malformed_params_return_coded_error() {
    let processor = WalletWireProcessor::new(ProtoWallet::new(SecretKey::random(&mut OsRng)));
    let frame = kestrel_wire::frame::write_request_frame(&RequestFrame {
        call: Call::Encrypt as u8,
        originator: String::new(),
        params: vec![0x07], // bad security level, nothing else
    })
    .unwrap();

    let response = processor.transmit_to_wallet(&frame).unwrap();
    match kestrel_wire::frame::read_result_frame(&response).unwrap() {
        kestrel_wire::ResultFrame::Error(error) => {
            assert_eq!(error.code, codes::INVALID_SECURITY_LEVEL);
        }
        other => panic!("expected error frame, got {other:?}"),
    }
}
