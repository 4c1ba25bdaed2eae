pub mod analysis;
pub mod config;
pub mod generator;
pub mod ingest;
pub mod metrics;
pub mod testing;
pub mod ticket;

pub use analysis::{
    compute_insights, AgentError, AgentOutcome, AgentRunner, AnalysisConfig, AnalysisReport,
    ExecutiveSummary, FlaggedIp, MitigationAgent, MitigationReport, RiskAgent, SummaryAgent,
    TicketInsights,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
    StoreBackend, StoreConfig,
};
pub use generator::{GeneratorConfig, TicketGenerator};
pub use ingest::{
    ingest_records, IngestSummary, JiraIssue, JiraSearchResponse, RejectedTicket, RejectionKind,
};
pub use ticket::{
    MemoryTicketStore, SqliteTicketStore, TicketError, TicketFilter, TicketRecord, TicketStore,
};
