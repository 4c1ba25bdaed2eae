//! Ticket storage trait and types.

use thiserror::Error;

use crate::ticket::TicketRecord;

/// Error type for ticket store operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// A ticket with this key is already staged. Keys come from the
    /// system of record, so the existing ticket is kept.
    #[error("Ticket already exists: {0}")]
    DuplicateKey(String),

    /// The record violates a shape invariant.
    #[error("Invalid ticket: {0}")]
    InvalidRecord(String),

    /// Storage backend error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Filter for querying tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Exact status match.
    pub status: Option<String>,
}

impl TicketFilter {
    /// Create a filter that matches every ticket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by exact status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Whether a record passes the filter.
    pub fn matches(&self, record: &TicketRecord) -> bool {
        match &self.status {
            Some(status) => record.has_status(status),
            None => true,
        }
    }
}

/// Trait for ticket storage backends.
///
/// Implementations serialize mutations against reads so that every `list`
/// returns a consistent point-in-time copy in insertion order.
pub trait TicketStore: Send + Sync {
    /// Append a ticket. Rejects duplicates and invalid records.
    fn add(&self, record: TicketRecord) -> Result<(), TicketError>;

    /// Get a ticket by key.
    fn get(&self, key: &str) -> Result<Option<TicketRecord>, TicketError>;

    /// List tickets matching the filter, in insertion order.
    fn list(&self, filter: &TicketFilter) -> Result<Vec<TicketRecord>, TicketError>;

    /// Count tickets matching the filter.
    fn count(&self, filter: &TicketFilter) -> Result<usize, TicketError>;

    /// Remove every ticket. Returns how many were removed.
    fn clear(&self) -> Result<usize, TicketError>;
}
