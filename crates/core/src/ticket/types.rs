//! Core ticket record type.

use serde::{Deserialize, Serialize};

/// Canonical priority value treated as "high risk" by every analysis.
///
/// Priorities are open strings; this is compared by exact, case-sensitive
/// equality. `Highest`, `high` and `Critical` do not match.
pub const HIGH_PRIORITY: &str = "High";

/// Canonical status for tickets still being worked.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// One security event tracked by the external ticketing system.
///
/// `priority` and `status` are opaque strings: the system of record can
/// introduce new values at any time. They are optional so that a producer
/// omitting them can be detected by the analysis layer, but when present
/// they are never empty (enforced by [`TicketRecord::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketRecord {
    /// Unique identifier from the system of record (e.g. `SOC-42`).
    pub key: String,
    /// Short one-line title.
    #[serde(default)]
    pub summary: String,
    /// Free-text body; may embed `KEY: value` lines such as `SRC_IP: ...`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TicketRecord {
    /// Create a record with only a key and summary set.
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            description: None,
            priority: None,
            labels: Vec::new(),
            status: None,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Whether the priority is exactly [`HIGH_PRIORITY`].
    pub fn is_high_priority(&self) -> bool {
        self.priority.as_deref() == Some(HIGH_PRIORITY)
    }

    /// Whether the status equals `status` exactly.
    pub fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }

    /// Check the shape invariants a store enforces on `add`.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.key.trim().is_empty() {
            return Err("key must not be empty".to_string());
        }
        if matches!(self.priority.as_deref(), Some("")) {
            return Err(format!("ticket {}: priority must not be empty", self.key));
        }
        if matches!(self.status.as_deref(), Some("")) {
            return Err(format!("ticket {}: status must not be empty", self.key));
        }
        Ok(())
    }
}
