//! DeepSeek relay layer
//!
//! This module provides the model registry, the conversation-history
//! assembler, and a streaming-capable client for the DeepSeek
//! chat-completions API (OpenAI-compatible wire format).

pub mod client;
pub mod error;
pub mod history;
pub mod model;
pub mod sse;
pub mod types;

// Re-export commonly used types
pub use client::DeepSeekClient;
pub use error::LlmError;
pub use history::{assemble_messages, SYSTEM_PROMPT};
pub use model::ChatModel;
pub use types::ChatMessage;
