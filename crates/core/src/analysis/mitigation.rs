//! Repeated attacker IP detection.
//!
//! Each ticket description contributes at most one IP: the first token shaped
//! like an IPv4 address (`\d+\.\d+\.\d+\.\d+`, ASCII digits, octets not range
//! checked). For generated SOC event logs this is the `SRC_IP` line, which
//! comes before `DST_IP`. IPs contributed by more than one ticket are flagged.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::{Agent, AgentError, FlaggedIp, FrequencyTable, MitigationReport, BLOCK_REPEATED_IPS};
use crate::ticket::TicketRecord;

static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("IPv4 pattern is valid"));

/// First IPv4-shaped token in `text`, if any.
pub fn extract_first_ipv4(text: &str) -> Option<&str> {
    IPV4_PATTERN.find(text).map(|m| m.as_str())
}

/// Flags source IPs that appear in more than one ticket and recommends a
/// firewall block.
#[derive(Debug, Default, Clone, Copy)]
pub struct MitigationAgent;

impl MitigationAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for MitigationAgent {
    type Output = MitigationReport;

    fn name(&self) -> &'static str {
        "mitigation"
    }

    fn run(&self, tickets: &[TicketRecord]) -> Result<MitigationReport, AgentError> {
        if tickets.iter().all(|t| t.description.is_none()) {
            return Ok(MitigationReport::no_signal());
        }

        let ips: FrequencyTable = tickets
            .iter()
            .filter_map(|t| t.description.as_deref())
            .filter_map(extract_first_ipv4)
            .collect();

        let flagged: Vec<FlaggedIp> = ips
            .repeated()
            .into_iter()
            .map(|(ip, count)| FlaggedIp { ip, count })
            .collect();

        debug!(
            distinct_ips = ips.len(),
            flagged = flagged.len(),
            "Scanned ticket descriptions for repeated IPs"
        );

        if flagged.is_empty() {
            return Ok(MitigationReport::no_signal());
        }

        Ok(MitigationReport {
            flagged_ips: Some(flagged),
            recommendation: Some(BLOCK_REPEATED_IPS.to_string()),
        })
    }
}
