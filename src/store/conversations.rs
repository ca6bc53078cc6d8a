//! SQLite-backed conversation store
//!
//! Two tables, `conversations` and `messages`, related 1-to-many with
//! cascading delete. Every operation opens a fresh connection scoped to that
//! operation; dropping the connection on any exit path releases it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Role;

use super::error::{Result, StoreError};

/// Number of characters of the first user message used as the title
const TITLE_PREFIX_CHARS: usize = 30;

/// A conversation row, without its messages
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub model: Option<String>,
}

/// A persisted chat turn
#[derive(Debug, Clone, Serialize)]
pub struct StoredMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A conversation together with its ordered messages
#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<StoredMessage>,
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Role::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("unknown role: {}", text).into()))
    }
}

/// Handle to the conversation database
///
/// Holds only the file path; connections are opened per call.
#[derive(Clone)]
pub struct ConversationStore {
    path: PathBuf,
}

impl ConversationStore {
    /// Open the store, creating the schema if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };

        let conn = store.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                model TEXT
            );
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (conversation_id) REFERENCES conversations (id)
                    ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_messages_conversation
                ON messages (conversation_id);",
        )?;

        Ok(store)
    }

    /// One connection per operation; foreign keys must be re-enabled on each
    /// new SQLite connection for the cascade to apply.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        Ok(conn)
    }

    /// Insert a new conversation with both timestamps set to now
    pub fn create(&self, title: &str, model: &str) -> Result<ConversationDetail> {
        let conn = self.connect()?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO conversations (id, title, created_at, updated_at, model)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, title, now, now, model],
        )?;

        Ok(ConversationDetail {
            conversation: Conversation {
                id,
                title: title.to_string(),
                created_at: now,
                updated_at: now,
                model: Some(model.to_string()),
            },
            messages: Vec::new(),
        })
    }

    /// All conversations, most recently updated first
    pub fn list(&self) -> Result<Vec<Conversation>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, created_at, updated_at, model FROM conversations
             ORDER BY updated_at DESC",
        )?;

        let conversations = stmt
            .query_map([], row_to_conversation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(conversations)
    }

    /// One conversation plus its messages in creation order
    pub fn get(&self, id: &str) -> Result<ConversationDetail> {
        let conn = self.connect()?;

        let conversation = conn
            .query_row(
                "SELECT id, title, created_at, updated_at, model FROM conversations
                 WHERE id = ?1",
                params![id],
                row_to_conversation,
            )
            .optional()?
            .ok_or(StoreError::NotFound("Conversation"))?;

        let mut stmt = conn.prepare(
            "SELECT id, conversation_id, role, content, created_at FROM messages
             WHERE conversation_id = ?1
             ORDER BY created_at, rowid",
        )?;

        let messages = stmt
            .query_map(params![id], row_to_message)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ConversationDetail {
            conversation,
            messages,
        })
    }

    /// Delete a conversation; its messages go with it via the cascade
    pub fn delete(&self, id: &str) -> Result<()> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM conversations WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(StoreError::NotFound("Conversation"));
        }
        Ok(())
    }

    /// Update the title only
    pub fn rename(&self, id: &str, title: &str) -> Result<()> {
        let conn = self.connect()?;
        let updated = conn.execute(
            "UPDATE conversations SET title = ?1 WHERE id = ?2",
            params![title, id],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound("Conversation"));
        }
        Ok(())
    }

    /// Persist the user turn of an exchange and touch `updated_at`
    pub fn record_user_turn(&self, conversation_id: &str, content: &str) -> Result<StoredMessage> {
        let conn = self.connect()?;
        let now = Utc::now();

        conn.execute(
            "UPDATE conversations SET updated_at = ?1 WHERE id = ?2",
            params![now, conversation_id],
        )?;

        insert_message(&conn, conversation_id, Role::User, content, now)
    }

    /// Persist the assistant turn of an exchange
    ///
    /// While the conversation holds at most two messages after the insert,
    /// the title is rewritten to a prefix of the first user message. The
    /// stored model is always overwritten with the model that produced the
    /// response.
    pub fn record_assistant_turn(
        &self,
        conversation_id: &str,
        content: &str,
        user_message: &str,
        model: &str,
    ) -> Result<StoredMessage> {
        let conn = self.connect()?;
        let now = Utc::now();

        let message = insert_message(&conn, conversation_id, Role::Assistant, content, now)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM messages WHERE conversation_id = ?1",
            params![conversation_id],
            |row| row.get(0),
        )?;

        if count <= 2 {
            conn.execute(
                "UPDATE conversations SET title = ?1 WHERE id = ?2",
                params![title_prefix(user_message), conversation_id],
            )?;
        }

        conn.execute(
            "UPDATE conversations SET model = ?1 WHERE id = ?2",
            params![model, conversation_id],
        )?;

        Ok(message)
    }
}

fn insert_message(
    conn: &Connection,
    conversation_id: &str,
    role: Role,
    content: &str,
    created_at: DateTime<Utc>,
) -> Result<StoredMessage> {
    let id = Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO messages (id, conversation_id, role, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, conversation_id, role, content, created_at],
    )?;

    Ok(StoredMessage {
        id,
        conversation_id: conversation_id.to_string(),
        role,
        content: content.to_string(),
        created_at,
    })
}

fn row_to_conversation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
        model: row.get(4)?,
    })
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredMessage> {
    Ok(StoredMessage {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        role: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// First ~30 characters of the message, with an ellipsis when truncated
///
/// Counts characters rather than bytes so multi-byte text never splits.
pub(crate) fn title_prefix(message: &str) -> String {
    let mut title: String = message.chars().take(TITLE_PREFIX_CHARS).collect();
    if message.chars().count() > TITLE_PREFIX_CHARS {
        title.push_str("...");
    }
    title
}
