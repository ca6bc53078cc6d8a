//! Conversation-history assembly
//!
//! Builds the exact message sequence sent upstream: one fixed system
//! instruction, a projection of the prior turns, then the current user turn.

use crate::models::{ChatTurn, Role};

use super::model::ChatModel;
use super::types::ChatMessage;

/// Fixed system instruction sent ahead of every request
pub const SYSTEM_PROMPT: &str =
    "You are a time management expert assistant, please help the user manage time and tasks.";

/// Assemble the upstream message sequence for one exchange
///
/// The reasoner model rejects sequences where an assistant turn directly
/// follows the system turn, so when the history opens with assistant turns
/// they are dropped up to the first user turn; everything from that point on
/// is kept in order. The general-purpose model takes the history unmodified.
pub fn assemble_messages(
    model: ChatModel,
    history: &[ChatTurn],
    current_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];

    let starts_with_assistant = matches!(history.first(), Some(turn) if turn.role == Role::Assistant);

    if model == ChatModel::Reasoner && starts_with_assistant {
        let mut user_seen = false;
        for turn in history {
            if turn.role == Role::User {
                user_seen = true;
            }
            if user_seen {
                messages.push(ChatMessage {
                    role: turn.role,
                    content: turn.content.clone(),
                });
            }
        }
    } else {
        for turn in history {
            messages.push(ChatMessage {
                role: turn.role,
                content: turn.content.clone(),
            });
        }
    }

    messages.push(ChatMessage::user(current_message));
    messages
}
