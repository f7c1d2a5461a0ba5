use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use annostore_types::{Annotation, Identity, Status};
use tracing::{debug, warn};

use crate::traits::AnnotationStore;

type Ledger = Arc<Mutex<Vec<Annotation>>>;

/// In-memory [`AnnotationStore`] for the gateway, tests, and embedding.
///
/// The map lock is held exclusively only while a ledger is being created;
/// appends and reads share it and then lock the single ledger they touch, so
/// unrelated identities do not contend. Every mutation is one insert or one
/// push, so a lock poisoned by a panicking caller still guards consistent
/// data and is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    ledgers: RwLock<HashMap<String, Ledger>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Printable keys of every ledger, sorted.
    pub fn identities(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read_ledgers().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of entries in the ledger for `id`, zero if it does not exist.
    pub fn entry_count(&self, id: &dyn Identity) -> usize {
        self.ledger(&id.printable())
            .map(|ledger| lock_ledger(&ledger).len())
            .unwrap_or(0)
    }

    fn ledger(&self, key: &str) -> Option<Ledger> {
        self.read_ledgers().get(key).cloned()
    }

    fn read_ledgers(&self) -> RwLockReadGuard<'_, HashMap<String, Ledger>> {
        self.ledgers.read().unwrap_or_else(|poisoned| {
            warn!("ledger map read lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn write_ledgers(&self) -> RwLockWriteGuard<'_, HashMap<String, Ledger>> {
        self.ledgers.write().unwrap_or_else(|poisoned| {
            warn!("ledger map write lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

fn lock_ledger(ledger: &Mutex<Vec<Annotation>>) -> MutexGuard<'_, Vec<Annotation>> {
    ledger.lock().unwrap_or_else(|poisoned| {
        warn!("ledger lock poisoned; recovering");
        poisoned.into_inner()
    })
}

impl AnnotationStore for InMemoryStore {
    fn create(&self, id: &dyn Identity, entry: Annotation) -> Status {
        let key = id.printable();
        let status = match self.write_ledgers().entry(key) {
            Entry::Occupied(_) => Status::Exists,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(vec![entry])));
                Status::Success
            }
        };
        debug!(identity = %id.printable(), %status, "create");
        status
    }

    fn append(&self, id: &dyn Identity, entry: Annotation) -> Status {
        let key = id.printable();
        let Some(ledger) = self.ledger(&key) else {
            debug!(identity = %key, "append to missing ledger");
            return Status::NotFound;
        };
        let len = {
            let mut entries = lock_ledger(&ledger);
            entries.push(entry);
            entries.len()
        };
        debug!(identity = %key, len, "append");
        Status::Success
    }

    fn find_by_identity(&self, id: &dyn Identity) -> (Vec<Annotation>, Status) {
        match self.ledger(&id.printable()) {
            Some(ledger) => (lock_ledger(&ledger).clone(), Status::Success),
            None => (Vec::new(), Status::NotFound),
        }
    }
}
