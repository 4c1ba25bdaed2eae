//! In-memory ticket store implementation.

use std::collections::HashSet;
use std::sync::RwLock;

use super::{TicketError, TicketFilter, TicketRecord, TicketStore};

#[derive(Default)]
struct Inner {
    records: Vec<TicketRecord>,
    keys: HashSet<String>,
}

/// In-memory ticket store.
///
/// A single `RwLock` guards both the ordered records and the key index, so
/// readers always get a copy taken between two complete mutations.
#[derive(Default)]
pub struct MemoryTicketStore {
    inner: RwLock<Inner>,
}

impl MemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> TicketError {
    TicketError::Database("ticket store lock poisoned".to_string())
}

impl TicketStore for MemoryTicketStore {
    fn add(&self, record: TicketRecord) -> Result<(), TicketError> {
        record.validate().map_err(TicketError::InvalidRecord)?;

        let mut inner = self.inner.write().map_err(poisoned)?;
        if !inner.keys.insert(record.key.clone()) {
            return Err(TicketError::DuplicateKey(record.key));
        }
        inner.records.push(record);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<TicketRecord>, TicketError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.iter().find(|r| r.key == key).cloned())
    }

    fn list(&self, filter: &TicketFilter) -> Result<Vec<TicketRecord>, TicketError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    fn count(&self, filter: &TicketFilter) -> Result<usize, TicketError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.records.iter().filter(|r| filter.matches(r)).count())
    }

    fn clear(&self) -> Result<usize, TicketError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let removed = inner.records.len();
        inner.records.clear();
        inner.keys.clear();
        Ok(removed)
    }
}
