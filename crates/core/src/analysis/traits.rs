//! Agent trait.

use serde::Serialize;

use super::AgentError;
use crate::ticket::TicketRecord;

/// A stateless analysis over a ticket snapshot.
///
/// Agents never mutate the tickets they are given and never depend on
/// another agent's output.
pub trait Agent: Send + Sync {
    type Output: Serialize + Send + 'static;

    /// Key the agent's result is reported under.
    fn name(&self) -> &'static str;

    fn run(&self, tickets: &[TicketRecord]) -> Result<Self::Output, AgentError>;
}
