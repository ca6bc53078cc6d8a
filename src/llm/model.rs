//! Model registry
//!
//! The fixed, closed set of DeepSeek model identifiers the relay is willing
//! to forward requests to.

use serde_json::Value;

use super::error::LlmError;

/// DeepSeek model identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatModel {
    /// DeepSeek-V3, general conversation model
    Chat,
    /// DeepSeek-R1, reasoning model
    Reasoner,
}

impl ChatModel {
    /// Every model in the registry, in registry order
    pub const ALL: [ChatModel; 2] = [ChatModel::Chat, ChatModel::Reasoner];

    /// Get the model identifier string for the DeepSeek API
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Chat => "deepseek-chat",
            ChatModel::Reasoner => "deepseek-reasoner",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChatModel::Chat => "DeepSeek-V3 model, general conversation model",
            ChatModel::Reasoner => "DeepSeek-R1 reasoning model, excels at complex reasoning",
        }
    }

    /// Look a model up by its identifier
    ///
    /// Unknown names yield [`LlmError::InvalidModel`] naming the received
    /// value and the full set of valid identifiers.
    pub fn from_name(name: &str) -> Result<ChatModel, LlmError> {
        ChatModel::ALL
            .iter()
            .copied()
            .find(|model| model.as_str() == name)
            .ok_or_else(|| LlmError::InvalidModel {
                model: name.to_string(),
                valid: ChatModel::ALL.iter().map(ChatModel::as_str).collect(),
            })
    }
}

/// The name→description mapping served by `GET /models`
pub fn registry() -> Value {
    let mut map = serde_json::Map::new();
    for model in ChatModel::ALL {
        map.insert(
            model.as_str().to_string(),
            Value::String(model.description().to_string()),
        );
    }
    Value::Object(map)
}
