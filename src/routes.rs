// Route definitions and state wiring

use warp::Filter;

use crate::handlers;
use crate::llm::DeepSeekClient;
use crate::store::{ConversationStore, TaskStore};

/// Shared application state handed to every request
#[derive(Clone)]
pub struct AppContext {
    pub tasks: TaskStore,
    pub conversations: ConversationStore,
    pub llm: DeepSeekClient,
}

pub fn configure_routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // GET /
    let root = warp::path::end()
        .and(warp::get())
        .and_then(handlers::root_handler);

    // GET /models
    let models = warp::path("models")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::models_handler);

    // GET /tasks
    let list_tasks = warp::path("tasks")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_tasks(ctx.tasks.clone()))
        .and_then(handlers::list_tasks_handler);

    // POST /tasks
    let create_task = warp::path("tasks")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_tasks(ctx.tasks.clone()))
        .and_then(handlers::create_task_handler);

    // PUT /tasks/{id}
    let update_task = warp::path("tasks")
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::json())
        .and(with_tasks(ctx.tasks.clone()))
        .and_then(handlers::update_task_handler);

    // DELETE /tasks/{id}
    let delete_task = warp::path("tasks")
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_tasks(ctx.tasks.clone()))
        .and_then(handlers::delete_task_handler);

    // POST /conversations
    let create_conversation = warp::path("conversations")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::create_conversation_handler);

    // GET /conversations
    let list_conversations = warp::path("conversations")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::list_conversations_handler);

    // GET /conversations/{id}
    let get_conversation = warp::path("conversations")
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::get_conversation_handler);

    // DELETE /conversations/{id}
    let delete_conversation = warp::path("conversations")
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::delete_conversation_handler);

    // PUT /conversations/{id}/title
    let rename_conversation = warp::path("conversations")
        .and(warp::path::param::<String>())
        .and(warp::path("title"))
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::json())
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::rename_conversation_handler);

    // POST /chat
    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_llm(ctx.llm.clone()))
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::chat_handler);

    // POST /chat_stream
    let chat_stream_post = warp::path("chat_stream")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_llm(ctx.llm.clone()))
        .and(with_conversations(ctx.conversations.clone()))
        .and_then(handlers::chat_stream_post_handler);

    // GET /chat_stream?message=...&model=...
    let chat_stream_get = warp::path("chat_stream")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<crate::models::ChatStreamQuery>())
        .and(with_llm(ctx.llm))
        .and(with_conversations(ctx.conversations))
        .and_then(handlers::chat_stream_get_handler);

    root.or(models)
        .or(list_tasks)
        .or(create_task)
        .or(update_task)
        .or(delete_task)
        .or(create_conversation)
        .or(list_conversations)
        .or(get_conversation)
        .or(delete_conversation)
        .or(rename_conversation)
        .or(chat)
        .or(chat_stream_post)
        .or(chat_stream_get)
}

fn with_tasks(
    store: TaskStore,
) -> impl Filter<Extract = (TaskStore,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn with_conversations(
    store: ConversationStore,
) -> impl Filter<Extract = (ConversationStore,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn with_llm(
    client: DeepSeekClient,
) -> impl Filter<Extract = (DeepSeekClient,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || client.clone())
}
