//! Mock ticket store for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::ticket::{MemoryTicketStore, TicketError, TicketFilter, TicketRecord, TicketStore};

/// Ticket store that behaves like [`MemoryTicketStore`] but can be told to
/// fail.
///
/// # Example
///
/// ```rust,ignore
/// use socdesk_core::testing::MockTicketStore;
///
/// let store = MockTicketStore::new();
/// store.fail_next("disk full");
/// assert!(store.add(record).is_err());
/// assert_eq!(store.call_count(), 1);
/// ```
#[derive(Default)]
pub struct MockTicketStore {
    inner: MemoryTicketStore,
    /// If set, the next operation fails with `Database(message)`.
    next_error: Mutex<Option<String>>,
    /// If set, every operation fails with `Database(message)`.
    always_error: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MockTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next operation only.
    pub fn fail_next(&self, message: &str) {
        if let Ok(mut next) = self.next_error.lock() {
            *next = Some(message.to_string());
        }
    }

    /// Fail every operation until [`MockTicketStore::recover`] is called.
    pub fn fail_always(&self, message: &str) {
        if let Ok(mut always) = self.always_error.lock() {
            *always = Some(message.to_string());
        }
    }

    pub fn recover(&self) {
        if let Ok(mut always) = self.always_error.lock() {
            *always = None;
        }
    }

    /// Number of store operations attempted so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), TicketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.next_error.lock().ok().and_then(|mut n| n.take()) {
            return Err(TicketError::Database(message));
        }
        if let Some(message) = self.always_error.lock().ok().and_then(|a| a.clone()) {
            return Err(TicketError::Database(message));
        }
        Ok(())
    }
}

impl TicketStore for MockTicketStore {
    fn add(&self, record: TicketRecord) -> Result<(), TicketError> {
        self.check()?;
        self.inner.add(record)
    }

    fn get(&self, key: &str) -> Result<Option<TicketRecord>, TicketError> {
        self.check()?;
        self.inner.get(key)
    }

    fn list(&self, filter: &TicketFilter) -> Result<Vec<TicketRecord>, TicketError> {
        self.check()?;
        self.inner.list(filter)
    }

    fn count(&self, filter: &TicketFilter) -> Result<usize, TicketError> {
        self.check()?;
        self.inner.count(filter)
    }

    fn clear(&self) -> Result<usize, TicketError> {
        self.check()?;
        self.inner.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_next_only_once() {
        let store = MockTicketStore::new();
        store.fail_next("boom");

        let err = store.list(&TicketFilter::new()).unwrap_err();
        assert!(matches!(err, TicketError::Database(ref m) if m == "boom"));
        assert!(store.list(&TicketFilter::new()).unwrap().is_empty());
        assert_eq!(store.call_count(), 2);
    }

    #[test]
    fn test_fail_always_until_recover() {
        let store = MockTicketStore::new();
        store.fail_always("offline");

        assert!(store.add(TicketRecord::new("SOC-1", "a")).is_err());
        assert!(store.clear().is_err());

        store.recover();
        store.add(TicketRecord::new("SOC-1", "a")).unwrap();
        assert_eq!(store.count(&TicketFilter::new()).unwrap(), 1);
    }
}
