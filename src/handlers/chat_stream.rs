// POST/GET /chat_stream handlers (streaming relay)

use async_stream::stream;
use futures_util::stream::Stream;
use futures_util::StreamExt;
use pin_utils::pin_mut;
use std::convert::Infallible;
use warp::sse::Event;

use crate::llm::{assemble_messages, ChatModel, DeepSeekClient};
use crate::models::{ChatRequest, ChatStreamQuery};
use crate::sse::{create_content_event, create_done_event, create_error_event, create_model_event};
use crate::store::ConversationStore;

pub async fn chat_stream_post_handler(
    request: ChatRequest,
    llm: DeepSeekClient,
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    println!("POST /chat_stream: model={}", request.model);

    Ok(warp::sse::reply(
        warp::sse::keep_alive().stream(relay_stream(request, llm, store)),
    ))
}

pub async fn chat_stream_get_handler(
    query: ChatStreamQuery,
    llm: DeepSeekClient,
    store: ConversationStore,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    println!("GET /chat_stream: model={}", query.model);

    // Without a message there is nothing to stream; reply with a plain
    // error object instead of committing to an event stream. An empty
    // value counts as missing.
    let message = match query.message {
        Some(message) if !message.is_empty() => message,
        _ => {
            return Ok(Box::new(warp::reply::json(&serde_json::json!({
                "error": "message parameter is required"
            }))));
        }
    };

    let request = ChatRequest {
        message,
        model: query.model,
        history: Vec::new(),
        conversation_id: None,
    };

    Ok(Box::new(warp::sse::reply(
        warp::sse::keep_alive().stream(relay_stream(request, llm, store)),
    )))
}

/// Produce the SSE frame sequence for one streaming exchange
///
/// Frame order: one model frame, zero or more content frames in upstream
/// order, one done frame. A validation or upstream failure replaces the rest
/// of the sequence with a single error frame. The caller drains one frame at
/// a time; dropping the stream cancels the upstream request.
fn relay_stream(
    request: ChatRequest,
    llm: DeepSeekClient,
    store: ConversationStore,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream! {
        let model = match ChatModel::from_name(&request.model) {
            Ok(model) => model,
            Err(e) => {
                yield create_error_event(&e.to_string());
                return;
            }
        };

        let messages = assemble_messages(model, &request.history, &request.message);

        let upstream = match llm.stream(model, messages).await {
            Ok(upstream) => upstream,
            Err(e) => {
                yield create_error_event(&e.to_string());
                return;
            }
        };

        yield create_model_event(model.as_str());

        if let Some(conversation_id) = &request.conversation_id {
            if let Err(e) = store.record_user_turn(conversation_id, &request.message) {
                eprintln!("Warning: failed to save user message: {}", e);
            }
        }

        let mut full_response = String::new();
        pin_mut!(upstream);

        while let Some(fragment) = upstream.next().await {
            match fragment {
                Ok(text) => {
                    full_response.push_str(&text);
                    yield create_content_event(&text);
                }
                Err(e) => {
                    // The already-persisted user turn stays; no rollback
                    yield create_error_event(&e.to_string());
                    return;
                }
            }
        }

        if let Some(conversation_id) = &request.conversation_id {
            if let Err(e) = store.record_assistant_turn(
                conversation_id,
                &full_response,
                &request.message,
                model.as_str(),
            ) {
                eprintln!("Warning: failed to save assistant message: {}", e);
            }
        }

        yield create_done_event();
    }
}
