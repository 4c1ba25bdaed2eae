//! Mapping from the external tracker's issue search payload to ticket records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ticket::TicketRecord;

/// Priority assumed when the tracker sends none.
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Status assumed when the tracker sends none.
pub const DEFAULT_STATUS: &str = "To Do";

/// Body of an issue search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraSearchResponse {
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: JiraFields,
}

/// The subset of issue fields the store cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraFields {
    #[serde(default)]
    pub summary: Option<String>,
    /// Rich-text document, or occasionally a plain string.
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub priority: Option<NamedField>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<NamedField>,
    #[serde(default)]
    pub duedate: Option<String>,
}

/// Nested `{ "name": ... }` object used for priority and status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedField {
    #[serde(default)]
    pub name: Option<String>,
}

/// Flatten a rich-text document into plain text.
///
/// Each top-level block contributes the text of its direct `text` children
/// followed by a newline; the result is trimmed. Plain strings pass through.
pub fn document_to_text(doc: &Value) -> String {
    if let Value::String(s) = doc {
        return s.trim().to_string();
    }

    let Some(blocks) = doc.get("content").and_then(Value::as_array) else {
        return String::new();
    };

    let mut text = String::new();
    for block in blocks {
        if let Some(items) = block.get("content").and_then(Value::as_array) {
            for item in items {
                if item.get("type").and_then(Value::as_str) == Some("text") {
                    if let Some(fragment) = item.get("text").and_then(Value::as_str) {
                        text.push_str(fragment);
                    }
                }
            }
        }
        text.push('\n');
    }

    text.trim().to_string()
}

fn named_or(field: Option<NamedField>, default: &str) -> String {
    field
        .and_then(|f| f.name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<JiraIssue> for TicketRecord {
    fn from(issue: JiraIssue) -> Self {
        let fields = issue.fields;

        let description = fields
            .description
            .as_ref()
            .filter(|d| !d.is_null())
            .map(document_to_text)
            .filter(|text| !text.is_empty());

        TicketRecord {
            key: issue.key,
            summary: fields.summary.unwrap_or_default(),
            description,
            priority: Some(named_or(fields.priority, DEFAULT_PRIORITY)),
            labels: fields.labels.unwrap_or_default(),
            status: Some(named_or(fields.status, DEFAULT_STATUS)),
            due_date: fields.duedate,
        }
    }
}
