//! Child-key derivation from a root key, counterparty and invoice number.

use k256::{PublicKey, SecretKey};
use kestrel_primitives::{
    anyone_public_key, anyone_secret_key, derive_child_public, derive_child_secret,
    shared_secret_x, KeyError, SymmetricKey,
};

use crate::{
    invoice::{compute_invoice_number, InvoiceError},
    types::{Counterparty, Protocol},
};

/// Error while deriving a key.
#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    /// The `(protocol, keyID)` pair failed invoice-number validation.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Symmetric keys cannot be derived with the holder themself as
    /// counterparty: both sides of the exchange would be one entity.
    #[error("cannot derive a symmetric key for self")]
    SelfSymmetricForbidden,

    /// An uninitialised counterparty reached the deriver. Callers substitute
    /// a per-operation default before deriving.
    #[error("counterparty must be initialised before derivation")]
    UninitializedCounterparty,

    /// The elliptic-curve derivation itself failed.
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Derives per-context keys from a root private key.
///
/// The root may be a specific identity or the well-known "anyone" key
/// (scalar 1); all operations work with either.
#[derive(Clone)]
pub struct KeyDeriver {
    root: SecretKey,
    root_public: PublicKey,
}

impl KeyDeriver {
    /// Create a deriver over a root private key.
    pub fn new(root: SecretKey) -> Self {
        let root_public = root.public_key();
        Self { root, root_public }
    }

    /// Create a deriver over the "anyone" key.
    pub fn anyone() -> Self {
        Self::new(anyone_secret_key())
    }

    /// The root identity's public key.
    pub fn root_public_key(&self) -> &PublicKey {
        &self.root_public
    }

    /// Derive a per-context public key.
    ///
    /// With `for_self` the result is the public half of the holder's own
    /// derived private key; without it, the counterpart's view
    /// (`counterpartyPub + t·G`). The two agree across parties.
    pub fn derive_public(
        &self,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
        for_self: bool,
    ) -> Result<PublicKey, DerivationError> {
        let counterparty_key = self.normalize_counterparty(counterparty)?;
        let invoice_number = compute_invoice_number(protocol, key_id)?;

        if for_self {
            let child = derive_child_secret(&self.root, &counterparty_key, &invoice_number)?;
            Ok(child.public_key())
        } else {
            Ok(derive_child_public(
                &counterparty_key,
                &self.root,
                &invoice_number,
            )?)
        }
    }

    /// Derive a per-context private key for signing or ECDH.
    pub fn derive_private(
        &self,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
    ) -> Result<SecretKey, DerivationError> {
        let counterparty_key = self.normalize_counterparty(counterparty)?;
        let invoice_number = compute_invoice_number(protocol, key_id)?;
        Ok(derive_child_secret(
            &self.root,
            &counterparty_key,
            &invoice_number,
        )?)
    }

    /// Derive a per-context 32-byte symmetric key: the x-coordinate of the
    /// ECDH point between the derived private key and the derived public
    /// key.
    ///
    /// `Myself` is rejected before any curve work; `Anyone` is rewritten to
    /// the concrete generator point so both sides agree on the context.
    pub fn derive_symmetric(
        &self,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
    ) -> Result<SymmetricKey, DerivationError> {
        let counterparty = match counterparty {
            Counterparty::Myself => return Err(DerivationError::SelfSymmetricForbidden),
            Counterparty::Anyone => Counterparty::Other(anyone_public_key()),
            other => other.clone(),
        };

        let derived_public = self.derive_public(protocol, key_id, &counterparty, false)?;
        let derived_private = self.derive_private(protocol, key_id, &counterparty)?;

        Ok(SymmetricKey::from_bytes(shared_secret_x(
            &derived_private,
            &derived_public,
        )))
    }

    /// Resolve a counterparty to a concrete public key.
    fn normalize_counterparty(
        &self,
        counterparty: &Counterparty,
    ) -> Result<PublicKey, DerivationError> {
        match counterparty {
            Counterparty::Uninitialized => Err(DerivationError::UninitializedCounterparty),
            Counterparty::Anyone => Ok(anyone_public_key()),
            Counterparty::Myself => Ok(self.root_public),
            Counterparty::Other(key) => Ok(*key),
        }
    }
}

impl std::fmt::Debug for KeyDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyDeriver")
            .field("root_public", &self.root_public)
            .finish_non_exhaustive()
    }
}
