//! Distribution statistics and workload recommendations for the dashboard.

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, FrequencyTable};
use crate::ticket::{TicketRecord, STATUS_IN_PROGRESS};

pub const ESCALATION_REVIEW: &str =
    "High volume of High priority tickets. Consider incident escalation review.";
pub const WORKLOAD_REVIEW: &str =
    "Large number of tickets still in progress. Review SOC workload distribution.";
pub const FLOW_STABLE: &str = "Ticket flow appears stable. Continue monitoring.";

/// A value and how many tickets carry it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Dashboard-level statistics over a ticket snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketInsights {
    pub total: usize,
    pub priority_distribution: Vec<ValueCount>,
    pub status_distribution: Vec<ValueCount>,
    /// Summaries that occur on more than one ticket.
    pub repeated_summaries: Vec<ValueCount>,
    pub recommendations: Vec<String>,
}

fn to_counts(pairs: Vec<(String, usize)>) -> Vec<ValueCount> {
    pairs
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect()
}

/// Compute insights using the same exact-match policy as the agents.
pub fn compute_insights(tickets: &[TicketRecord], config: &AnalysisConfig) -> TicketInsights {
    let priorities: FrequencyTable = tickets.iter().filter_map(|t| t.priority.as_deref()).collect();
    let statuses: FrequencyTable = tickets.iter().filter_map(|t| t.status.as_deref()).collect();
    let summaries: FrequencyTable = tickets
        .iter()
        .map(|t| t.summary.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    let high = tickets.iter().filter(|t| t.is_high_priority()).count();
    let in_progress = statuses.get(STATUS_IN_PROGRESS);

    let mut recommendations = Vec::new();
    if high > config.escalation_threshold {
        recommendations.push(ESCALATION_REVIEW.to_string());
    }
    if in_progress > config.backlog_threshold {
        recommendations.push(WORKLOAD_REVIEW.to_string());
    }
    if recommendations.is_empty() {
        recommendations.push(FLOW_STABLE.to_string());
    }

    TicketInsights {
        total: tickets.len(),
        priority_distribution: to_counts(priorities.sorted()),
        status_distribution: to_counts(statuses.sorted()),
        repeated_summaries: to_counts(summaries.repeated()),
        recommendations,
    }
}
