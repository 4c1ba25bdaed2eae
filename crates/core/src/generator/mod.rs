//! Synthetic SOC event ticket generator.
//!
//! Produces tickets shaped like the ones the SOC simulator files upstream:
//! a `SOC_EVENT_LOG` description with one `KEY: value` line per attribute,
//! where roughly 40% of source IPs come from a small set of repeat attackers
//! so the mitigation agent has something to find.

mod config;

pub use config::GeneratorConfig;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ticket::{TicketRecord, STATUS_IN_PROGRESS};

/// Source IPs that recur across generated tickets.
pub const REPEAT_ATTACKERS: [&str; 3] = ["185.243.115.84", "45.33.21.9", "103.77.192.11"];

const REPEAT_ATTACKER_RATE: f64 = 0.4;

const ANALYSTS: [&str; 8] = [
    "Alice Chen",
    "Bob Patel",
    "Carlos Ruiz",
    "Dana Smith",
    "Ethan Lee",
    "Fatima Khan",
    "George Li",
    "Hannah Park",
];

const COUNTRIES: [&str; 8] = [
    "USA", "Germany", "India", "Brazil", "Japan", "Canada", "UK", "Australia",
];

const EVENT_TYPES: [&str; 5] = [
    "Failed Login",
    "Malware Execution",
    "Port Scan",
    "Privilege Escalation",
    "Data Exfiltration",
];

const SEVERITIES: [&str; 4] = ["Low", "Medium", "High", "Critical"];

const PRIORITIES: [&str; 4] = ["Highest", "High", "Medium", "Low"];

const LABELS: [&str; 3] = ["security", "incident", "alert"];

/// Generates SOC event tickets with sequential keys.
pub struct TicketGenerator<R = StdRng> {
    rng: R,
    project_key: String,
    next_seq: u64,
}

impl TicketGenerator<StdRng> {
    /// Generator seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(&config.project_key, rng)
    }
}

impl<R: Rng> TicketGenerator<R> {
    pub fn with_rng(project_key: &str, rng: R) -> Self {
        Self {
            rng,
            project_key: project_key.to_string(),
            next_seq: 1,
        }
    }

    /// Generate one ticket stamped with the current time.
    pub fn generate(&mut self) -> TicketRecord {
        self.generate_at(Utc::now())
    }

    /// Generate `count` tickets stamped with the current time.
    pub fn generate_batch(&mut self, count: usize) -> Vec<TicketRecord> {
        let now = Utc::now();
        (0..count).map(|_| self.generate_at(now)).collect()
    }

    /// Generate one ticket as if created at `now`.
    pub fn generate_at(&mut self, now: DateTime<Utc>) -> TicketRecord {
        let src_ip = if self.rng.gen_bool(REPEAT_ATTACKER_RATE) {
            self.pick(&REPEAT_ATTACKERS).to_string()
        } else {
            self.random_ip()
        };
        let dst_ip = self.random_ip();
        let country = self.pick(&COUNTRIES);
        let severity = self.pick(&SEVERITIES);
        let event_type = self.pick(&EVENT_TYPES);
        let analyst = self.pick(&ANALYSTS);

        let description = format!(
            "SOC_EVENT_LOG\n\n\
             SRC_IP: {}\n\
             DST_IP: {}\n\
             COUNTRY: {}\n\
             SEVERITY: {}\n\
             EVENT_TYPE: {}\n\
             TIMESTAMP: {}\n\
             ANALYST: {}",
            src_ip,
            dst_ip,
            country,
            severity,
            event_type,
            now.format("%Y-%m-%d %H:%M:%S"),
            analyst,
        );

        let priority = self.pick(&PRIORITIES);
        let label = self.pick(&LABELS);
        let due_in_days = self.rng.gen_range(1..=7);
        let due_date = (now + Duration::days(due_in_days))
            .format("%Y-%m-%d")
            .to_string();

        let key = format!("{}-{}", self.project_key, self.next_seq);
        self.next_seq += 1;

        TicketRecord::new(key, "SOC Event Alert")
            .with_description(description)
            .with_priority(priority)
            .with_labels([label])
            .with_status(STATUS_IN_PROGRESS)
            .with_due_date(due_date)
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn random_ip(&mut self) -> String {
        let octets: Vec<String> = (0..4)
            .map(|_| self.rng.gen_range(1..=255u8).to_string())
            .collect();
        octets.join(".")
    }
}
