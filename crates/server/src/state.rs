use std::sync::{Arc, Mutex};

use socdesk_core::{
    AgentRunner, AnalysisReport, Config, TicketGenerator, TicketRecord, TicketStore,
};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn TicketStore>,
    runner: Arc<AgentRunner>,
    generator: Mutex<TicketGenerator>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn TicketStore>) -> Self {
        let generator = TicketGenerator::from_config(&config.generator);
        Self {
            config,
            store,
            runner: Arc::new(AgentRunner::new()),
            generator: Mutex::new(generator),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn TicketStore {
        self.store.as_ref()
    }

    /// Generate `count` synthetic tickets. Keys keep counting across calls.
    pub fn generate_tickets(&self, count: usize) -> Vec<TicketRecord> {
        match self.generator.lock() {
            Ok(mut generator) => generator.generate_batch(count),
            Err(poisoned) => poisoned.into_inner().generate_batch(count),
        }
    }

    /// Run every agent over `tickets`, concurrently if configured.
    pub async fn analyze(&self, tickets: Vec<TicketRecord>) -> AnalysisReport {
        if self.config.analysis.concurrent {
            Arc::clone(&self.runner)
                .run_all_concurrent(Arc::from(tickets))
                .await
        } else {
            self.runner.run_all(&tickets)
        }
    }
}
