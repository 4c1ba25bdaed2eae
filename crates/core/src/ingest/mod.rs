//! Ingestion of tickets produced by external collaborators.

mod jira;

pub use jira::{
    document_to_text, JiraFields, JiraIssue, JiraSearchResponse, NamedField, DEFAULT_PRIORITY,
    DEFAULT_STATUS,
};

use serde::Serialize;
use tracing::{debug, info};

use crate::ticket::{TicketError, TicketRecord, TicketStore};

/// Why the store refused a record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    Duplicate,
    Invalid,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::Duplicate => "duplicate",
            RejectionKind::Invalid => "invalid",
        }
    }
}

/// A record the store refused during a batch ingest.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RejectedTicket {
    pub key: String,
    pub kind: RejectionKind,
    pub reason: String,
}

/// Outcome of a batch ingest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestSummary {
    pub added: Vec<String>,
    pub rejected: Vec<RejectedTicket>,
}

/// Add every record to the store, collecting per-record rejections.
///
/// Duplicate and invalid records are reported and skipped; a storage
/// backend failure aborts the batch.
pub fn ingest_records<I>(store: &dyn TicketStore, records: I) -> Result<IngestSummary, TicketError>
where
    I: IntoIterator<Item = TicketRecord>,
{
    let mut summary = IngestSummary::default();

    for record in records {
        let key = record.key.clone();
        match store.add(record) {
            Ok(()) => summary.added.push(key),
            Err(e @ (TicketError::DuplicateKey(_) | TicketError::InvalidRecord(_))) => {
                debug!(key = %key, error = %e, "Skipping ticket");
                let kind = match &e {
                    TicketError::DuplicateKey(_) => RejectionKind::Duplicate,
                    _ => RejectionKind::Invalid,
                };
                summary.rejected.push(RejectedTicket {
                    key,
                    kind,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        added = summary.added.len(),
        rejected = summary.rejected.len(),
        "Ingested tickets"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{MemoryTicketStore, TicketFilter};

    #[test]
    fn test_ingest_collects_rejections() {
        let store = MemoryTicketStore::new();
        store
            .add(TicketRecord::new("SOC-1", "existing").with_status("Done"))
            .unwrap();

        let records = vec![
            TicketRecord::new("SOC-1", "dup").with_status("To Do"),
            TicketRecord::new("SOC-2", "new").with_status("To Do"),
            TicketRecord::new("", "no key"),
        ];
        let summary = ingest_records(&store, records).unwrap();

        assert_eq!(summary.added, vec!["SOC-2"]);
        assert_eq!(summary.rejected.len(), 2);
        assert_eq!(summary.rejected[0].key, "SOC-1");
        assert_eq!(summary.rejected[0].kind, RejectionKind::Duplicate);
        assert_eq!(summary.rejected[1].kind, RejectionKind::Invalid);
        assert!(summary.rejected[0].reason.contains("already exists"));
        assert_eq!(store.count(&TicketFilter::new()).unwrap(), 2);
    }

    #[test]
    fn test_ingest_search_response() {
        let response: JiraSearchResponse = serde_json::from_value(serde_json::json!({
            "issues": [
                { "key": "SOC-7", "fields": { "summary": "a", "status": { "name": "Done" } } },
                { "key": "SOC-8", "fields": { "summary": "b" } }
            ]
        }))
        .unwrap();

        let store = MemoryTicketStore::new();
        let summary = ingest_records(
            &store,
            response.issues.into_iter().map(TicketRecord::from),
        )
        .unwrap();

        assert_eq!(summary.added, vec!["SOC-7", "SOC-8"]);
        let stored = store.get("SOC-8").unwrap().unwrap();
        assert_eq!(stored.status.as_deref(), Some(DEFAULT_STATUS));
    }

    #[test]
    fn test_ingest_aborts_on_backend_failure() {
        let store = crate::testing::MockTicketStore::new();
        store.add(TicketRecord::new("SOC-1", "a")).unwrap();
        store.fail_next("disk full");

        let result = ingest_records(
            &store,
            vec![TicketRecord::new("SOC-2", "b"), TicketRecord::new("SOC-3", "c")],
        );

        assert!(matches!(result, Err(TicketError::Database(_))));
        assert_eq!(store.count(&TicketFilter::new()).unwrap(), 1);
    }
}
