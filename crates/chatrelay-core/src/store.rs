//! SQLite persistence for chat interactions.
//!
//! Each exchange is stored as a `UserQueries` row plus a `ChatbotResponses`
//! row pointing back at it. Both rows are written in one transaction.

use crate::{RelayError, Result};
use chatrelay_types::{ChatInteraction, ChatbotResponse, NewInteraction, UserQuery};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// SQLite-backed interaction store.
///
/// Cloning is cheap and every clone shares the same connection.
#[derive(Clone)]
pub struct InteractionStore {
    conn: Arc<Mutex<Connection>>,
}

impl InteractionStore {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        info!(target: "chatrelay::store", "Opened interaction store at {}", path.display());
        Self::from_connection(conn)
    }

    /// Wrap an existing connection, creating the schema if needed.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RelayError::InternalError("interaction store lock poisoned".into()))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS UserQueries (
                QueryID INTEGER PRIMARY KEY AUTOINCREMENT,
                QueryText TEXT NOT NULL,
                Timestamp TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS ChatbotResponses (
                ResponseID INTEGER PRIMARY KEY AUTOINCREMENT,
                QueryID INTEGER NOT NULL REFERENCES UserQueries(QueryID),
                ResponseText TEXT NOT NULL,
                Timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_user_queries_timestamp ON UserQueries(Timestamp);
            CREATE INDEX IF NOT EXISTS idx_chatbot_responses_query ON ChatbotResponses(QueryID);
            "#,
        )?;
        Ok(())
    }

    /// Write a query row and its response row.
    ///
    /// The response references the query's generated id. Either both rows are
    /// committed or neither is.
    pub fn insert_interaction(&self, interaction: &NewInteraction) -> Result<ChatInteraction> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let timestamp = format_timestamp(&interaction.timestamp);

        tx.execute(
            "INSERT INTO UserQueries (QueryText, Timestamp) VALUES (?1, ?2)",
            params![interaction.query, timestamp],
        )?;
        let query = UserQuery {
            id: tx.last_insert_rowid(),
            text: interaction.query.clone(),
            timestamp: interaction.timestamp,
        };
        debug!(target: "chatrelay::store", "User query saved with id {}", query.id);

        tx.execute(
            "INSERT INTO ChatbotResponses (QueryID, ResponseText, Timestamp) VALUES (?1, ?2, ?3)",
            params![query.id, interaction.response, timestamp],
        )?;
        let response = ChatbotResponse {
            id: tx.last_insert_rowid(),
            query_id: query.id,
            text: interaction.response.clone(),
            timestamp: interaction.timestamp,
        };
        debug!(target: "chatrelay::store", "Chatbot response saved with id {}", response.id);

        tx.commit()?;

        ChatInteraction::join(query, response).ok_or_else(|| {
            RelayError::InternalError("response row does not reference its query".into())
        })
    }

    /// List every complete interaction, newest first.
    ///
    /// Queries without a stored response are not returned.
    pub fn list_interactions(&self) -> Result<Vec<ChatInteraction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT q.QueryID, q.QueryText, r.ResponseText, q.Timestamp
            FROM UserQueries q
            INNER JOIN ChatbotResponses r ON r.QueryID = q.QueryID
            ORDER BY q.Timestamp DESC, q.QueryID DESC
            "#,
        )?;
        let interactions = stmt
            .query_map([], |row| {
                Ok(ChatInteraction {
                    id: row.get(0)?,
                    query: row.get(1)?,
                    response: row.get(2)?,
                    timestamp: parse_timestamp(3, &row.get::<_, String>(3)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(interactions)
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
