//! Agent runner: every agent over one ticket snapshot.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    Agent, AgentError, AgentOutcome, AnalysisReport, ExecutiveSummary, MitigationAgent,
    MitigationReport, RiskAgent, SummaryAgent,
};
use crate::metrics::{AGENT_DURATION, AGENT_FAILURES, ANALYSIS_RUNS, FLAGGED_IPS, SNAPSHOT_SIZE};
use crate::ticket::TicketRecord;

/// Runs the summary, risk and mitigation agents against the same snapshot.
///
/// Each agent is isolated: an error or panic in one is reported in its own
/// slot of the [`AnalysisReport`] and the others still run.
pub struct AgentRunner<S = SummaryAgent, R = RiskAgent, M = MitigationAgent> {
    summary: S,
    risk: R,
    mitigation: M,
}

impl AgentRunner {
    /// Runner with the standard agents.
    pub fn new() -> Self {
        Self::with_agents(SummaryAgent, RiskAgent, MitigationAgent)
    }
}

impl Default for AgentRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, R, M> AgentRunner<S, R, M>
where
    S: Agent<Output = ExecutiveSummary>,
    R: Agent<Output = Vec<TicketRecord>>,
    M: Agent<Output = MitigationReport>,
{
    /// Runner with substitute agents.
    pub fn with_agents(summary: S, risk: R, mitigation: M) -> Self {
        Self {
            summary,
            risk,
            mitigation,
        }
    }

    /// Run all agents one after another.
    pub fn run_all(&self, tickets: &[TicketRecord]) -> AnalysisReport {
        ANALYSIS_RUNS.with_label_values(&["sequential"]).inc();

        let summary = run_agent(&self.summary, tickets);
        let high_risk = run_agent(&self.risk, tickets);
        let mitigation = run_agent(&self.mitigation, tickets);

        finish_report(tickets.len(), summary, high_risk, mitigation)
    }
}

impl<S, R, M> AgentRunner<S, R, M>
where
    S: Agent<Output = ExecutiveSummary> + 'static,
    R: Agent<Output = Vec<TicketRecord>> + 'static,
    M: Agent<Output = MitigationReport> + 'static,
{
    /// Run all agents in parallel on blocking tasks over a shared snapshot.
    pub async fn run_all_concurrent(
        self: Arc<Self>,
        tickets: Arc<[TicketRecord]>,
    ) -> AnalysisReport {
        ANALYSIS_RUNS.with_label_values(&["concurrent"]).inc();

        let summary_task = {
            let runner = Arc::clone(&self);
            let tickets = Arc::clone(&tickets);
            tokio::task::spawn_blocking(move || run_agent(&runner.summary, &tickets))
        };
        let risk_task = {
            let runner = Arc::clone(&self);
            let tickets = Arc::clone(&tickets);
            tokio::task::spawn_blocking(move || run_agent(&runner.risk, &tickets))
        };
        let mitigation_task = {
            let runner = Arc::clone(&self);
            let tickets = Arc::clone(&tickets);
            tokio::task::spawn_blocking(move || run_agent(&runner.mitigation, &tickets))
        };

        let (summary, high_risk, mitigation) =
            tokio::join!(summary_task, risk_task, mitigation_task);

        finish_report(
            tickets.len(),
            summary.unwrap_or_else(|e| lost_task(self.summary.name(), e)),
            high_risk.unwrap_or_else(|e| lost_task(self.risk.name(), e)),
            mitigation.unwrap_or_else(|e| lost_task(self.mitigation.name(), e)),
        )
    }
}

fn run_agent<A: Agent>(agent: &A, tickets: &[TicketRecord]) -> AgentOutcome<A::Output> {
    let name = agent.name();
    let started = Instant::now();

    let result = panic::catch_unwind(AssertUnwindSafe(|| agent.run(tickets)))
        .unwrap_or_else(|payload| Err(AgentError::Aborted(panic_message(payload.as_ref()))));

    AGENT_DURATION
        .with_label_values(&[name])
        .observe(started.elapsed().as_secs_f64());

    match result {
        Ok(result) => {
            debug!(agent = name, "Agent completed");
            AgentOutcome::Ok { result }
        }
        Err(e) => {
            warn!(agent = name, error = %e, "Agent failed");
            AGENT_FAILURES.with_label_values(&[name]).inc();
            AgentOutcome::Failed {
                agent: name.to_string(),
                error: e.to_string(),
            }
        }
    }
}

fn lost_task<T>(agent: &str, error: tokio::task::JoinError) -> AgentOutcome<T> {
    warn!(agent, error = %error, "Agent task lost");
    AGENT_FAILURES.with_label_values(&[agent]).inc();
    AgentOutcome::Failed {
        agent: agent.to_string(),
        error: AgentError::Aborted(error.to_string()).to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

fn finish_report(
    ticket_count: usize,
    summary: AgentOutcome<ExecutiveSummary>,
    high_risk: AgentOutcome<Vec<TicketRecord>>,
    mitigation: AgentOutcome<MitigationReport>,
) -> AnalysisReport {
    SNAPSHOT_SIZE
        .with_label_values(&[])
        .observe(ticket_count as f64);
    if let Some(report) = mitigation.result() {
        let flagged = report.flagged_ips.as_ref().map(Vec::len).unwrap_or(0);
        FLAGGED_IPS.with_label_values(&[]).observe(flagged as f64);
    }

    let report = AnalysisReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        ticket_count,
        summary,
        high_risk,
        mitigation,
    };

    info!(
        run_id = %report.run_id,
        tickets = ticket_count,
        failed = ?report.failed_agents(),
        "Analysis run complete"
    );

    report
}
