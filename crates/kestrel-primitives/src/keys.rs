//! secp256k1 key helpers.
//!
//! The derivation scheme here underpins every per-context key in the SDK:
//! both sides of a conversation compute an offset scalar `t` from an ECDH
//! shared secret and an invoice-number label, and tweak their view of a key
//! pair by it:
//!
//! ```text
//! shared = x(rootPriv · counterpartyPub)          // 32-byte x-coordinate
//! t      = HMAC-SHA-512(shared, invoiceNumber)    // reduced mod n
//! childPriv = rootPriv + t                        // holder's view
//! childPub  = counterpartyPub + t·G               // counterpart's view
//! ```
//!
//! The two views agree because the ECDH point is symmetric. A `t` or child
//! scalar of zero is cryptographically negligible but still reported as
//! [`KeyError::DegenerateDerivation`] rather than silently remapped.

use k256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature, SigningKey, VerifyingKey,
    },
    elliptic_curve::{ops::Reduce, point::AffineCoordinates},
    FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey, U256,
};
use zeroize::Zeroize;

use crate::hashes::hmac_sha512;

/// Error while deriving or using a key.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The derivation offset or the resulting child scalar was zero, or the
    /// resulting public point was the identity.
    #[error("derivation produced a degenerate key")]
    DegenerateDerivation,

    /// ECDSA signing failed.
    #[error("ecdsa failure: {0}")]
    Ecdsa(#[from] k256::ecdsa::Error),
}

/// The "anyone" secret key: the scalar 1.
///
/// Used as the root identity when the counterparty is the public at large.
pub fn anyone_secret_key() -> SecretKey {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;
    SecretKey::from_slice(&bytes).expect("scalar one is a valid secp256k1 secret key")
}

/// The "anyone" public key: the curve generator `G`.
pub fn anyone_public_key() -> PublicKey {
    anyone_secret_key().public_key()
}

/// x-coordinate of the ECDH point `secret · public`, as 32 big-endian bytes.
pub fn shared_secret_x(secret: &SecretKey, public: &PublicKey) -> [u8; 32] {
    let scalar: Scalar = *secret.to_nonzero_scalar();
    // The group has prime order, so a nonzero scalar times a valid public
    // point is never the identity.
    let shared = public.to_projective() * scalar;
    let x: FieldBytes = shared.to_affine().x();
    x.into()
}

/// Derive the offset scalar `t` for `(root, counterparty, invoice_number)`.
fn derive_child_offset(
    root: &SecretKey,
    counterparty: &PublicKey,
    invoice_number: &str,
) -> Result<Scalar, KeyError> {
    let mut shared = shared_secret_x(root, counterparty);
    let digest = hmac_sha512(&shared, invoice_number.as_bytes());
    shared.zeroize();

    let t = scalar_from_wide_bytes(&digest);
    if t == Scalar::ZERO {
        return Err(KeyError::DegenerateDerivation);
    }
    Ok(t)
}

/// Child secret key: `root + t (mod n)`.
pub fn derive_child_secret(
    root: &SecretKey,
    counterparty: &PublicKey,
    invoice_number: &str,
) -> Result<SecretKey, KeyError> {
    let t = derive_child_offset(root, counterparty, invoice_number)?;
    let child = *root.to_nonzero_scalar() + t;
    Option::<NonZeroScalar>::from(NonZeroScalar::new(child))
        .map(SecretKey::from)
        .ok_or(KeyError::DegenerateDerivation)
}

/// Child public key from the counterpart's view: `counterparty + t·G`.
///
/// `root` is the local secret used for the ECDH half of the offset; the
/// returned point equals the public key of [`derive_child_secret`] computed
/// by the other party with the roles swapped.
pub fn derive_child_public(
    counterparty: &PublicKey,
    root: &SecretKey,
    invoice_number: &str,
) -> Result<PublicKey, KeyError> {
    let t = derive_child_offset(root, counterparty, invoice_number)?;
    let point = counterparty.to_projective() + ProjectivePoint::GENERATOR * t;
    PublicKey::from_affine(point.to_affine()).map_err(|_| KeyError::DegenerateDerivation)
}

/// ECDSA-sign a 32-byte prehash, returning the DER-encoded signature.
///
/// Deterministic per RFC 6979; `s` is low-normalised.
pub fn sign_prehash_der(secret: &SecretKey, prehash: &[u8; 32]) -> Result<Vec<u8>, KeyError> {
    let signing_key = SigningKey::from(secret);
    let signature: Signature = signing_key.sign_prehash(prehash)?;
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a DER-encoded ECDSA signature over a 32-byte prehash.
///
/// Malformed DER verifies as `false`; there is no caller-visible distinction
/// between "unparseable" and "wrong".
pub fn verify_prehash_der(public: &PublicKey, prehash: &[u8; 32], signature_der: &[u8]) -> bool {
    let Ok(signature) = Signature::from_der(signature_der) else {
        return false;
    };
    VerifyingKey::from(public)
        .verify_prehash(prehash, &signature)
        .is_ok()
}

/// Interpret 64 big-endian bytes as an integer and reduce it mod the curve
/// order.
///
/// Split as `hi·2^256 + lo`; both halves reduce independently and
/// `2^256 mod n` is recovered as `reduce(2^256 - 1) + 1`, avoiding a
/// hardcoded constant.
fn scalar_from_wide_bytes(bytes: &[u8; 64]) -> Scalar {
    let hi = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&bytes[..32]));
    let lo = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&bytes[32..]));
    let shift = <Scalar as Reduce<U256>>::reduce(U256::MAX) + Scalar::ONE;
    hi * shift + lo
}
