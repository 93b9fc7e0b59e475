//! LRU-memoised key derivation.
//!
//! Derivations are pure, so memoising them is purely a latency win: a cache
//! hit must be byte-identical to a fresh derivation. The fingerprint keys
//! preserve *semantic* counterparty identity — `Myself` and `Anyone` stay
//! distinct from `Other(P)` even when `P` happens to equal the root key or
//! the generator — so a hit never changes which context a caller addressed.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey, SecretKey};
use kestrel_primitives::SymmetricKey;

use crate::{
    deriver::{DerivationError, KeyDeriver},
    types::{Counterparty, Protocol},
};

/// Cache capacity used when the caller passes `0`.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Which derivation method produced a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Method {
    Public { for_self: bool },
    Private,
    Symmetric,
}

/// Counterparty identity as stored in a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CounterpartyTag {
    Anyone,
    Myself,
    Other([u8; 33]),
}

impl CounterpartyTag {
    fn new(counterparty: &Counterparty) -> Option<Self> {
        match counterparty {
            // Uninitialised never reaches the cache: the deriver rejects it.
            Counterparty::Uninitialized => None,
            Counterparty::Anyone => Some(Self::Anyone),
            Counterparty::Myself => Some(Self::Myself),
            Counterparty::Other(key) => {
                let point = key.to_encoded_point(true);
                let mut bytes = [0u8; 33];
                bytes.copy_from_slice(point.as_bytes());
                Some(Self::Other(bytes))
            }
        }
    }
}

/// Cache key: every parameter that affects a derived output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Fingerprint {
    method: Method,
    protocol: Protocol,
    key_id: String,
    counterparty: CounterpartyTag,
}

#[derive(Clone)]
enum DerivedValue {
    Public(PublicKey),
    Private(SecretKey),
    Symmetric(SymmetricKey),
}

struct Entry {
    value: DerivedValue,
    stamp: u64,
}

/// Bounded map + recency index. All access goes through the owning mutex in
/// [`CachedKeyDeriver`].
struct LruCache {
    entries: HashMap<Fingerprint, Entry>,
    recency: BTreeMap<u64, Fingerprint>,
    capacity: usize,
    clock: u64,
}

impl LruCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            capacity,
            clock: 0,
        }
    }

    /// Look up a fingerprint, promoting it to most-recently-used on a hit.
    fn get(&mut self, fingerprint: &Fingerprint) -> Option<DerivedValue> {
        self.clock += 1;
        let clock = self.clock;
        let entry = self.entries.get_mut(fingerprint)?;
        self.recency.remove(&entry.stamp);
        entry.stamp = clock;
        self.recency.insert(clock, fingerprint.clone());
        Some(entry.value.clone())
    }

    /// Insert or refresh a fingerprint, evicting the least-recently-used
    /// entry when the capacity would otherwise be exceeded.
    fn put(&mut self, fingerprint: Fingerprint, value: DerivedValue) {
        self.clock += 1;
        let clock = self.clock;

        if let Some(entry) = self.entries.get_mut(&fingerprint) {
            self.recency.remove(&entry.stamp);
            entry.value = value;
            entry.stamp = clock;
            self.recency.insert(clock, fingerprint);
            return;
        }

        self.entries.insert(
            fingerprint.clone(),
            Entry {
                value,
                stamp: clock,
            },
        );
        self.recency.insert(clock, fingerprint);

        if self.entries.len() > self.capacity {
            if let Some((_, oldest)) = self.recency.pop_first() {
                self.entries.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        debug_assert_eq!(self.entries.len(), self.recency.len());
        self.entries.len()
    }
}

/// A [`KeyDeriver`] that memoises derivations behind a bounded,
/// thread-safe LRU cache.
///
/// Public and symmetric derivations are cached unconditionally. Private-key
/// derivations are only cached when opted in with
/// [`CachedKeyDeriver::cache_private_keys`], to keep secret material out of
/// long-lived containers by default.
pub struct CachedKeyDeriver {
    deriver: KeyDeriver,
    cache: Mutex<LruCache>,
    cache_private: bool,
}

impl CachedKeyDeriver {
    /// Create a caching deriver. A `capacity` of `0` selects
    /// [`DEFAULT_CACHE_CAPACITY`].
    pub fn new(root: SecretKey, capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CACHE_CAPACITY
        } else {
            capacity
        };
        Self {
            deriver: KeyDeriver::new(root),
            cache: Mutex::new(LruCache::new(capacity)),
            cache_private: false,
        }
    }

    /// Opt in to caching derived private keys.
    pub fn cache_private_keys(mut self, enabled: bool) -> Self {
        self.cache_private = enabled;
        self
    }

    /// The root identity's public key.
    pub fn root_public_key(&self) -> &PublicKey {
        self.deriver.root_public_key()
    }

    /// [`KeyDeriver::derive_public`], memoised.
    pub fn derive_public(
        &self,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
        for_self: bool,
    ) -> Result<PublicKey, DerivationError> {
        let fingerprint =
            self.fingerprint(Method::Public { for_self }, protocol, key_id, counterparty);

        if let Some(fingerprint) = &fingerprint {
            if let Some(DerivedValue::Public(key)) = self.lock().get(fingerprint) {
                return Ok(key);
            }
        }

        let key = self
            .deriver
            .derive_public(protocol, key_id, counterparty, for_self)?;
        if let Some(fingerprint) = fingerprint {
            self.lock().put(fingerprint, DerivedValue::Public(key));
        }
        Ok(key)
    }

    /// [`KeyDeriver::derive_private`], memoised only when private-key
    /// caching is enabled.
    pub fn derive_private(
        &self,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
    ) -> Result<SecretKey, DerivationError> {
        if !self.cache_private {
            return self.deriver.derive_private(protocol, key_id, counterparty);
        }

        let fingerprint = self.fingerprint(Method::Private, protocol, key_id, counterparty);

        if let Some(fingerprint) = &fingerprint {
            if let Some(DerivedValue::Private(key)) = self.lock().get(fingerprint) {
                return Ok(key);
            }
        }

        let key = self.deriver.derive_private(protocol, key_id, counterparty)?;
        if let Some(fingerprint) = fingerprint {
            self.lock()
                .put(fingerprint, DerivedValue::Private(key.clone()));
        }
        Ok(key)
    }

    /// [`KeyDeriver::derive_symmetric`], memoised.
    pub fn derive_symmetric(
        &self,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
    ) -> Result<SymmetricKey, DerivationError> {
        let fingerprint = self.fingerprint(Method::Symmetric, protocol, key_id, counterparty);

        if let Some(fingerprint) = &fingerprint {
            if let Some(DerivedValue::Symmetric(key)) = self.lock().get(fingerprint) {
                return Ok(key);
            }
        }

        let key = self
            .deriver
            .derive_symmetric(protocol, key_id, counterparty)?;
        if let Some(fingerprint) = fingerprint {
            self.lock()
                .put(fingerprint, DerivedValue::Symmetric(key.clone()));
        }
        Ok(key)
    }

    /// Number of live cache entries.
    pub fn cached_entries(&self) -> usize {
        self.lock().len()
    }

    fn fingerprint(
        &self,
        method: Method,
        protocol: &Protocol,
        key_id: &str,
        counterparty: &Counterparty,
    ) -> Option<Fingerprint> {
        Some(Fingerprint {
            method,
            protocol: protocol.clone(),
            key_id: key_id.to_owned(),
            counterparty: CounterpartyTag::new(counterparty)?,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache> {
        // Poisoning means a panic mid-derivation; propagate it.
        self.cache.lock().expect("derivation cache mutex poisoned")
    }
}

impl std::fmt::Debug for CachedKeyDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedKeyDeriver")
            .field("root_public", self.deriver.root_public_key())
            .field("cache_private", &self.cache_private)
            .finish_non_exhaustive()
    }
}
