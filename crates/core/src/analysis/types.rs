//! Types shared by the analysis agents and the runner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::ticket::TicketRecord;

/// Recommendation attached to a mitigation report with flagged IPs.
pub const BLOCK_REPEATED_IPS: &str = "Block repeated IP addresses at firewall.";

/// Errors an agent can report instead of a result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    /// Tickets lack a field the agent needs to answer its question.
    #[error("missing {field} on tickets: {}", .tickets.join(", "))]
    MissingField { field: String, tickets: Vec<String> },

    /// The agent panicked or its task was lost.
    #[error("agent aborted: {0}")]
    Aborted(String),
}

/// Result slot for one agent in an [`AnalysisReport`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentOutcome<T> {
    Ok { result: T },
    Failed { agent: String, error: String },
}

impl<T> AgentOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, AgentOutcome::Ok { .. })
    }

    /// The agent's output, if it succeeded.
    pub fn result(&self) -> Option<&T> {
        match self {
            AgentOutcome::Ok { result } => Some(result),
            AgentOutcome::Failed { .. } => None,
        }
    }

    /// The failure message, if it failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            AgentOutcome::Ok { .. } => None,
            AgentOutcome::Failed { error, .. } => Some(error),
        }
    }
}

/// Output of the summary agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutiveSummary {
    /// Number of tickets in the snapshot.
    pub total: usize,
    /// Tickets whose priority is exactly `High`.
    pub high_priority: usize,
    /// Most frequent status, if any ticket carries one.
    pub most_common_status: Option<String>,
    /// Operator-facing sentence form of the three facts above.
    pub narrative: String,
}

/// An IP seen in more than one ticket description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlaggedIp {
    pub ip: String,
    pub count: usize,
}

/// Output of the mitigation agent. Both fields are `None` when there is no
/// signal (no descriptions, or no repeated IP).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MitigationReport {
    pub flagged_ips: Option<Vec<FlaggedIp>>,
    pub recommendation: Option<String>,
}

impl MitigationReport {
    pub fn no_signal() -> Self {
        Self::default()
    }

    pub fn is_no_signal(&self) -> bool {
        self.flagged_ips.is_none() && self.recommendation.is_none()
    }

    /// Occurrence count for a flagged IP, or 0 if not flagged.
    pub fn count_for(&self, ip: &str) -> usize {
        self.flagged_ips
            .iter()
            .flatten()
            .find(|f| f.ip == ip)
            .map(|f| f.count)
            .unwrap_or(0)
    }
}

/// Combined output of one orchestration run over a single snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub ticket_count: usize,
    pub summary: AgentOutcome<ExecutiveSummary>,
    pub high_risk: AgentOutcome<Vec<TicketRecord>>,
    pub mitigation: AgentOutcome<MitigationReport>,
}

impl AnalysisReport {
    /// Names of the agents that did not produce a result.
    pub fn failed_agents(&self) -> Vec<&str> {
        let mut failed = Vec::new();
        for (name, ok) in [
            ("summary", self.summary.is_ok()),
            ("high_risk", self.high_risk.is_ok()),
            ("mitigation", self.mitigation.is_ok()),
        ] {
            if !ok {
                failed.push(name);
            }
        }
        failed
    }
}
