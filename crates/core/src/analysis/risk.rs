//! High-priority ticket selection.

use super::{Agent, AgentError};
use crate::ticket::TicketRecord;

/// Selects the tickets whose priority is exactly `High`, in their original
/// order. `Highest`, `high` and other values are not included.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiskAgent;

impl RiskAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RiskAgent {
    type Output = Vec<TicketRecord>;

    fn name(&self) -> &'static str {
        "high_risk"
    }

    fn run(&self, tickets: &[TicketRecord]) -> Result<Vec<TicketRecord>, AgentError> {
        Ok(tickets
            .iter()
            .filter(|t| t.is_high_priority())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(key: &str, priority: Option<&str>) -> TicketRecord {
        let t = TicketRecord::new(key, "").with_status("To Do");
        match priority {
            Some(p) => t.with_priority(p),
            None => t,
        }
    }

    #[test]
    fn test_selects_high_in_order() {
        let tickets = vec![
            ticket("SOC-1", Some("High")),
            ticket("SOC-2", Some("Medium")),
            ticket("SOC-3", Some("High")),
        ];
        let high = RiskAgent.run(&tickets).unwrap();
        let keys: Vec<_> = high.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["SOC-1", "SOC-3"]);
    }

    #[test]
    fn test_exact_match_only() {
        let tickets = vec![
            ticket("SOC-1", Some("Highest")),
            ticket("SOC-2", Some("high")),
            ticket("SOC-3", Some("Critical")),
            ticket("SOC-4", None),
        ];
        assert!(RiskAgent.run(&tickets).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(RiskAgent.run(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let tickets = vec![ticket("SOC-1", Some("High")), ticket("SOC-2", Some("Low"))];
        let before = tickets.clone();
        let _ = RiskAgent.run(&tickets).unwrap();
        assert_eq!(tickets, before);
    }
}
