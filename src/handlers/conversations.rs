// /conversations handlers

use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;

use crate::models::{ConversationCreate, TitleUpdate};
use crate::store::{ConversationStore, StoreError};

/// Map a store error to the JSON error reply for the conversation endpoints
fn error_reply(err: StoreError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    warp::reply::with_status(warp::reply::json(&json!({ "error": err.to_string() })), status)
}

pub async fn create_conversation_handler(
    request: ConversationCreate,
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.create(&request.title, &request.model) {
        Ok(detail) => Ok(warp::reply::with_status(
            warp::reply::json(&detail),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}

pub async fn list_conversations_handler(
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.list() {
        Ok(conversations) => Ok(warp::reply::with_status(
            warp::reply::json(&conversations),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}

pub async fn get_conversation_handler(
    id: String,
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.get(&id) {
        Ok(detail) => Ok(warp::reply::with_status(
            warp::reply::json(&detail),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}

pub async fn delete_conversation_handler(
    id: String,
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.delete(&id) {
        Ok(()) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "message": "Conversation deleted" })),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}

pub async fn rename_conversation_handler(
    id: String,
    update: TitleUpdate,
    store: ConversationStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.rename(&id, &update.title) {
        Ok(()) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "message": "Title updated successfully" })),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}
