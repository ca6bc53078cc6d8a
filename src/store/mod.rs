//! Task and conversation storage
//!
//! Tasks live in process memory only and are lost on restart. Conversations
//! and their messages are persisted in a SQLite file; every operation opens
//! its own connection for the duration of that operation.

pub mod conversations;
pub mod error;
pub mod tasks;

// Re-export main types for convenience
pub use conversations::{Conversation, ConversationDetail, ConversationStore, StoredMessage};
pub use error::{Result, StoreError};
pub use tasks::TaskStore;
