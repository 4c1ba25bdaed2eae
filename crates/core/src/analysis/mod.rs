//! Ticket analysis agents and the runner that combines them.
//!
//! Three independent agents read the same snapshot:
//! - **summary**: headline counts and the most common status
//! - **high_risk**: tickets with priority exactly `High`
//! - **mitigation**: source IPs repeated across tickets
//!
//! Priority and status are compared as exact strings everywhere, including
//! in [`compute_insights`].

mod config;
mod frequency;
mod insights;
mod mitigation;
mod risk;
mod runner;
mod summary;
mod traits;
mod types;

pub use config::AnalysisConfig;
pub use frequency::FrequencyTable;
pub use insights::{
    compute_insights, TicketInsights, ValueCount, ESCALATION_REVIEW, FLOW_STABLE, WORKLOAD_REVIEW,
};
pub use mitigation::{extract_first_ipv4, MitigationAgent};
pub use risk::RiskAgent;
pub use runner::AgentRunner;
pub use summary::{SummaryAgent, NO_TICKETS};
pub use traits::Agent;
pub use types::{
    AgentError, AgentOutcome, AnalysisReport, ExecutiveSummary, FlaggedIp, MitigationReport,
    BLOCK_REPEATED_IPS,
};
