// Handlers module

pub mod chat;
pub mod chat_stream;
pub mod conversations;
pub mod meta;
pub mod tasks;

pub use chat::chat_handler;
pub use chat_stream::{chat_stream_get_handler, chat_stream_post_handler};
pub use conversations::{
    create_conversation_handler, delete_conversation_handler, get_conversation_handler,
    list_conversations_handler, rename_conversation_handler,
};
pub use meta::{models_handler, root_handler};
pub use tasks::{create_task_handler, delete_task_handler, list_tasks_handler, update_task_handler};
