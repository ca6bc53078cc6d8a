// POST /chat handler (blocking relay)

use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;

use crate::llm::{assemble_messages, ChatModel, DeepSeekClient};
use crate::models::{ChatRequest, ChatResponse};
use crate::store::ConversationStore;

pub async fn chat_handler(
    request: ChatRequest,
    llm: DeepSeekClient,
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    println!(
        "POST /chat: model={} history={} turns",
        request.model,
        request.history.len()
    );

    // Validation precedes everything; no upstream request for unknown models
    let model = match ChatModel::from_name(&request.model) {
        Ok(model) => model,
        Err(e) => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&json!({ "error": e.to_string() })),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let messages = assemble_messages(model, &request.history, &request.message);

    // The user turn is persisted before the upstream call; a failed call
    // leaves it in place.
    if let Some(conversation_id) = &request.conversation_id {
        if let Err(e) = store.record_user_turn(conversation_id, &request.message) {
            eprintln!("Warning: failed to save user message: {}", e);
        }
    }

    let content = match llm.complete(model, messages).await {
        Ok(content) => content,
        Err(e) => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&json!({
                    "error": format!("Communication error with DeepSeek: {}", e)
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
    };

    if let Some(conversation_id) = &request.conversation_id {
        if let Err(e) =
            store.record_assistant_turn(conversation_id, &content, &request.message, model.as_str())
        {
            eprintln!("Warning: failed to save assistant message: {}", e);
        }
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&ChatResponse {
            response: content,
            model: model.as_str().to_string(),
        }),
        StatusCode::OK,
    ))
}
