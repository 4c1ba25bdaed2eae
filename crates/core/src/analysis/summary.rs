//! Executive summary agent.

use super::{Agent, AgentError, ExecutiveSummary, FrequencyTable};
use crate::ticket::TicketRecord;

/// Narrative reported for an empty snapshot.
pub const NO_TICKETS: &str = "No tickets available.";

/// Produces the headline counts for the whole snapshot: total tickets,
/// exact-`High` priority tickets, and the most frequent status.
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryAgent;

impl SummaryAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for SummaryAgent {
    type Output = ExecutiveSummary;

    fn name(&self) -> &'static str {
        "summary"
    }

    fn run(&self, tickets: &[TicketRecord]) -> Result<ExecutiveSummary, AgentError> {
        if tickets.is_empty() {
            return Ok(ExecutiveSummary {
                total: 0,
                high_priority: 0,
                most_common_status: None,
                narrative: NO_TICKETS.to_string(),
            });
        }

        let incomplete: Vec<String> = tickets
            .iter()
            .filter(|t| t.priority.is_none() && t.status.is_none())
            .map(|t| t.key.clone())
            .collect();
        if !incomplete.is_empty() {
            return Err(AgentError::MissingField {
                field: "priority and status".to_string(),
                tickets: incomplete,
            });
        }

        let total = tickets.len();
        let high_priority = tickets.iter().filter(|t| t.is_high_priority()).count();
        let statuses: FrequencyTable = tickets
            .iter()
            .filter_map(|t| t.status.as_deref())
            .collect();
        let most_common_status = statuses.most_common().map(|(s, _)| s.to_string());

        let narrative = format!(
            "There are currently {} active SOC tickets. {} are marked as High priority. \
             Most common status: {}.",
            total,
            high_priority,
            most_common_status.as_deref().unwrap_or("none recorded")
        );

        Ok(ExecutiveSummary {
            total,
            high_priority,
            most_common_status,
            narrative,
        })
    }
}
