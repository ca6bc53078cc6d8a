use warp::sse::Event;

/// Create the model SSE frame emitted at the start of a streaming exchange
pub fn create_model_event(model: &str) -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({ "model": model });

    Ok(Event::default().data(payload.to_string()))
}

/// Create a content SSE frame carrying one incremental text fragment
pub fn create_content_event(content: &str) -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({ "content": content });

    Ok(Event::default().data(payload.to_string()))
}

/// Create an error SSE frame; it terminates the frame sequence
pub fn create_error_event(error: &str) -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({ "error": error });

    Ok(Event::default().data(payload.to_string()))
}

/// Create the terminal done SSE frame
pub fn create_done_event() -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({ "done": true });

    Ok(Event::default().data(payload.to_string()))
}
