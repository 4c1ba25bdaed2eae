//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the agent runner and insight thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Run the three agents on blocking tasks in parallel instead of one
    /// after another. Results are identical either way.
    #[serde(default)]
    pub concurrent: bool,

    /// Recommend an escalation review when more than this many tickets are
    /// exactly `High` priority.
    #[serde(default = "default_escalation_threshold")]
    pub escalation_threshold: usize,

    /// Recommend a workload review when more than this many tickets are
    /// exactly `In Progress`.
    #[serde(default = "default_backlog_threshold")]
    pub backlog_threshold: usize,
}

fn default_escalation_threshold() -> usize {
    3
}

fn default_backlog_threshold() -> usize {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            concurrent: false,
            escalation_threshold: default_escalation_threshold(),
            backlog_threshold: default_backlog_threshold(),
        }
    }
}
