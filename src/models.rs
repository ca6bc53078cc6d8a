// Data structures shared by the HTTP surface (tasks, chat requests)

use serde::{Deserialize, Serialize};

/// Role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instruction prepended to every upstream request
    System,
    /// Human input
    User,
    /// Model output
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

// Task Struct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: bool,
}

/// Body of `POST /tasks` and `PUT /tasks/{id}` (the id comes from the path)
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// One prior turn supplied by the client as chat history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
}

/// Query parameters of `GET /chat_stream`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatStreamQuery {
    pub message: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationCreate {
    pub title: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleUpdate {
    pub title: String,
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
    }

    #[test]
    fn test_role_parse_round_trip() {
        for role in [Role::System, Role::User, Role::Assistant] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("tool"), None);
    }

    #[test]
    fn test_chat_request_defaults() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(request.message, "hi");
        assert_eq!(request.model, "deepseek-chat");
        assert!(request.history.is_empty());
        assert!(request.conversation_id.is_none());
    }

    #[test]
    fn test_chat_request_with_history() {
        let json = r#"{
            "message": "next",
            "model": "deepseek-reasoner",
            "history": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": "reply"}
            ],
            "conversation_id": "abc"
        }"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.model, "deepseek-reasoner");
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].role, Role::User);
        assert_eq!(request.conversation_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_task_input_defaults() {
        let input: TaskInput = serde_json::from_str(r#"{"title":"plan week"}"#).unwrap();
        assert_eq!(input.title, "plan week");
        assert!(input.description.is_none());
        assert!(input.due_date.is_none());
        assert!(!input.completed);
    }

    #[test]
    fn test_conversation_create_default_model() {
        let create: ConversationCreate =
            serde_json::from_str(r#"{"title":"New conversation"}"#).unwrap();
        assert_eq!(create.model, "deepseek-chat");
    }
}
