//! Deterministic, invoice-number based key derivation.
//!
//! A single root secp256k1 key fans out into an unbounded family of
//! per-context keys, scoped by a [`Protocol`], a key identifier and a
//! [`Counterparty`]. The canonical label for a context is its *invoice
//! number*, `"{securityLevel}-{normalisedName}-{keyID}"`, which is the sole
//! domain separator between derivations: same label, same root, same
//! counterparty — same key.
//!
//! - [`invoice`] builds and validates invoice numbers.
//! - [`deriver`] derives public, private and symmetric child keys.
//! - [`cache`] memoises derivations behind a bounded LRU.

pub mod cache;
pub mod deriver;
pub mod invoice;
mod types;

pub use cache::{CachedKeyDeriver, DEFAULT_CACHE_CAPACITY};
pub use deriver::{DerivationError, KeyDeriver};
pub use invoice::{compute_invoice_number, InvoiceError};
pub use types::{Counterparty, Protocol, SecurityLevel};
