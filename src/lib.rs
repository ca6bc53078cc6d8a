// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sse;

// Task and conversation stores
pub mod store;

// DeepSeek relay layer
pub mod llm;
