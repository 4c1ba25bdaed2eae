//! Ticket records and the intermediary store they are staged in.

mod memory_store;
mod sqlite_store;
mod store;
mod types;

pub use memory_store::MemoryTicketStore;
pub use sqlite_store::SqliteTicketStore;
pub use store::{TicketError, TicketFilter, TicketStore};
pub use types::{TicketRecord, HIGH_PRIORITY, STATUS_IN_PROGRESS};
