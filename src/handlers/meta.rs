// GET / and GET /models handlers

use std::convert::Infallible;

use crate::llm::model;

pub async fn root_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&serde_json::json!({
        "message": "Welcome to Time Management App"
    })))
}

pub async fn models_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&model::registry()))
}
