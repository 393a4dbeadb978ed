//! Nonce ↔ custody transaction id tracking.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::custody::types::TxId;

/// Bidirectional map between chain nonces and custody transaction ids.
///
/// A nonce seen again before its receipt was retrieved marks the new
/// submission as a replacement of the old one. The lock is held only for
/// the map mutation itself, never across a network call, so submissions
/// for distinct nonces do not serialize on I/O.
#[derive(Debug, Default)]
pub struct NonceLedger {
    inner: Mutex<Maps>,
}

#[derive(Debug, Default)]
struct Maps {
    nonce_to_id: HashMap<u64, TxId>,
    id_to_nonce: HashMap<TxId, u64>,
}

impl NonceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Maps> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track `id` as the live submission for `nonce`, superseding any prior
    /// entry for either key so the two maps stay mutual inverses.
    pub fn record(&self, nonce: u64, id: TxId) {
        let mut maps = self.lock();
        if let Some(old_id) = maps.nonce_to_id.insert(nonce, id.clone()) {
            if old_id != id {
                maps.id_to_nonce.remove(&old_id);
            }
        }
        if let Some(old_nonce) = maps.id_to_nonce.insert(id, nonce) {
            if old_nonce != nonce {
                maps.nonce_to_id.remove(&old_nonce);
            }
        }
    }

    /// The custody transaction currently tracked for `nonce`, if any.
    pub fn lookup(&self, nonce: u64) -> Option<TxId> {
        self.lock().nonce_to_id.get(&nonce).cloned()
    }

    /// Stop tracking `id` once its receipt has been retrieved. Returns the
    /// released nonce; a no-op for ids that are not (or no longer) tracked.
    pub fn release(&self, id: &TxId) -> Option<u64> {
        let mut maps = self.lock();
        let nonce = maps.id_to_nonce.remove(id)?;
        maps.nonce_to_id.remove(&nonce);
        Some(nonce)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.lock().nonce_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
