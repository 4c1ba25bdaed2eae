//! SQLite-backed ticket store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::{TicketError, TicketFilter, TicketRecord, TicketStore};

const SELECT_COLUMNS: &str =
    "SELECT key, summary, description, priority, labels, status, due_date FROM tickets";

/// SQLite-backed ticket store.
///
/// Insertion order is kept by an autoincrement `seq` column, so it survives
/// reopening the database.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Create a new SQLite ticket store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, TicketError> {
        let conn = Connection::open(path).map_err(|e| TicketError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite ticket store (useful for testing).
    pub fn in_memory() -> Result<Self, TicketError> {
        let conn =
            Connection::open_in_memory().map_err(|e| TicketError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL UNIQUE,
                summary TEXT NOT NULL DEFAULT '',
                description TEXT,
                priority TEXT,
                labels TEXT NOT NULL DEFAULT '[]',
                status TEXT,
                due_date TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
            "#,
        )
        .map_err(|e| TicketError::Database(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, TicketError> {
        self.conn
            .lock()
            .map_err(|_| TicketError::Database("connection lock poisoned".to_string()))
    }

    fn build_where_clause(filter: &TicketFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref status) = filter.status {
            conditions.push("status = ?");
            params.push(Box::new(status.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<TicketRecord> {
        let labels_json: String = row.get(4)?;
        // Labels are written by this store as JSON; treat anything else as empty
        let labels: Vec<String> = serde_json::from_str(&labels_json).unwrap_or_default();

        Ok(TicketRecord {
            key: row.get(0)?,
            summary: row.get(1)?,
            description: row.get(2)?,
            priority: row.get(3)?,
            labels,
            status: row.get(5)?,
            due_date: row.get(6)?,
        })
    }
}

impl TicketStore for SqliteTicketStore {
    fn add(&self, record: TicketRecord) -> Result<(), TicketError> {
        record.validate().map_err(TicketError::InvalidRecord)?;

        let labels_json =
            serde_json::to_string(&record.labels).map_err(|e| TicketError::Database(e.to_string()))?;

        let conn = self.lock()?;

        let exists = conn
            .query_row(
                "SELECT 1 FROM tickets WHERE key = ?",
                params![record.key],
                |_| Ok(()),
            )
            .optional()
            .map_err(|e| TicketError::Database(e.to_string()))?;
        if exists.is_some() {
            return Err(TicketError::DuplicateKey(record.key));
        }

        conn.execute(
            "INSERT INTO tickets (key, summary, description, priority, labels, status, due_date) VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                record.key,
                record.summary,
                record.description,
                record.priority,
                labels_json,
                record.status,
                record.due_date,
            ],
        )
        .map_err(|e| TicketError::Database(e.to_string()))?;

        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<TicketRecord>, TicketError> {
        let conn = self.lock()?;

        conn.query_row(
            &format!("{} WHERE key = ?", SELECT_COLUMNS),
            params![key],
            Self::row_to_record,
        )
        .optional()
        .map_err(|e| TicketError::Database(e.to_string()))
    }

    fn list(&self, filter: &TicketFilter) -> Result<Vec<TicketRecord>, TicketError> {
        let conn = self.lock()?;

        let (where_clause, params) = Self::build_where_clause(filter);
        let sql = format!("{} {} ORDER BY seq ASC", SELECT_COLUMNS, where_clause);

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| TicketError::Database(e.to_string()))?;

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), Self::row_to_record)
            .map_err(|e| TicketError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row_result in rows {
            records.push(row_result.map_err(|e| TicketError::Database(e.to_string()))?);
        }

        Ok(records)
    }

    fn count(&self, filter: &TicketFilter) -> Result<usize, TicketError> {
        let conn = self.lock()?;

        let (where_clause, params) = Self::build_where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM tickets {}", where_clause);

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = conn
            .query_row(&sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(|e| TicketError::Database(e.to_string()))?;

        Ok(count as usize)
    }

    fn clear(&self) -> Result<usize, TicketError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM tickets", [])
            .map_err(|e| TicketError::Database(e.to_string()))
    }
}
