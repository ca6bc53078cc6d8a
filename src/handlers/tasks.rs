// /tasks handlers

use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;

use crate::models::TaskInput;
use crate::store::TaskStore;

pub async fn list_tasks_handler(store: TaskStore) -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&store.list()))
}

pub async fn create_task_handler(
    input: TaskInput,
    store: TaskStore,
) -> Result<impl warp::Reply, Infallible> {
    let task = store.create(input);
    println!("POST /tasks: created task {}", task.id);

    Ok(warp::reply::json(&task))
}

pub async fn update_task_handler(
    id: u64,
    input: TaskInput,
    store: TaskStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.update(id, input) {
        Ok(task) => Ok(warp::reply::with_status(
            warp::reply::json(&task),
            StatusCode::OK,
        )),
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "error": e.to_string() })),
            StatusCode::NOT_FOUND,
        )),
    }
}

pub async fn delete_task_handler(
    id: u64,
    store: TaskStore,
) -> Result<impl warp::Reply, Infallible> {
    match store.delete(id) {
        Ok(()) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "message": "Task deleted" })),
            StatusCode::OK,
        )),
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "error": e.to_string() })),
            StatusCode::NOT_FOUND,
        )),
    }
}
