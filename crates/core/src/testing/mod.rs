//! Testing utilities shared by unit and integration tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use socdesk_core::testing::{fixtures, MockTicketStore};
//!
//! let store = MockTicketStore::new();
//! for ticket in fixtures::mixed_priority_scenario() {
//!     store.add(ticket)?;
//! }
//! store.fail_next("disk full");
//! ```

mod mock_store;

pub use mock_store::MockTicketStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::ticket::TicketRecord;

    /// Create a test ticket with priority and status set.
    pub fn ticket(key: &str, priority: &str, status: &str) -> TicketRecord {
        TicketRecord::new(key, format!("Alert {}", key))
            .with_priority(priority)
            .with_status(status)
            .with_labels(["security"])
    }

    /// Create a test ticket whose description carries a SOC event log with
    /// the given source IP.
    pub fn soc_event(key: &str, src_ip: &str) -> TicketRecord {
        ticket(key, "Medium", "In Progress").with_description(format!(
            "SOC_EVENT_LOG\n\nSRC_IP: {}\nDST_IP: 10.0.0.1\nEVENT_TYPE: Port Scan",
            src_ip
        ))
    }

    /// Three tickets: priorities High, Medium, High; statuses Done, Done,
    /// In Progress.
    pub fn mixed_priority_scenario() -> Vec<TicketRecord> {
        vec![
            ticket("SOC-1", "High", "Done"),
            ticket("SOC-2", "Medium", "Done"),
            ticket("SOC-3", "High", "In Progress"),
        ]
    }

    /// Two tickets mentioning 10.0.0.5 and one without any IP.
    pub fn repeated_ip_scenario() -> Vec<TicketRecord> {
        vec![
            ticket("SOC-1", "Low", "To Do")
                .with_description("Blocked traffic ... 10.0.0.5 ... on edge router"),
            ticket("SOC-2", "Medium", "To Do").with_description("attempt from 10.0.0.5 again"),
            ticket("SOC-3", "High", "To Do").with_description("Phishing report, no network data"),
        ]
    }

    /// `n` distinct tickets cycling through the canonical priorities.
    pub fn batch(n: usize) -> Vec<TicketRecord> {
        const PRIORITIES: [&str; 4] = ["Highest", "High", "Medium", "Low"];
        const STATUSES: [&str; 3] = ["To Do", "In Progress", "Done"];
        (1..=n)
            .map(|i| {
                ticket(
                    &format!("SOC-{}", i),
                    PRIORITIES[i % PRIORITIES.len()],
                    STATUSES[i % STATUSES.len()],
                )
            })
            .collect()
    }
}
