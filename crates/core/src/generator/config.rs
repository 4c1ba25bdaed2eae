//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for synthetic ticket generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Project prefix for generated keys (`SOC` gives `SOC-1`, `SOC-2`, ...).
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Tickets generated per request when no count is given.
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Upper bound on tickets generated per request.
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Fixed RNG seed for reproducible runs. Random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_project_key() -> String {
    "SOC".to_string()
}

fn default_count() -> usize {
    20
}

fn default_max_count() -> usize {
    500
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_key: default_project_key(),
            default_count: default_count(),
            max_count: default_max_count(),
            seed: None,
        }
    }
}
