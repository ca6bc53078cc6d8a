use timedesk::llm::DeepSeekClient;
use timedesk::routes::{configure_routes, AppContext};
use timedesk::store::{ConversationStore, TaskStore};

#[tokio::main]
async fn main() {
    let db_path = std::env::var("TIMEDESK_DB").unwrap_or_else(|_| "chat_history.db".to_string());

    let conversations = match ConversationStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open database {}: {}", db_path, e);
            std::process::exit(1);
        }
    };

    let llm = match DeepSeekClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build DeepSeek client: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = AppContext {
        tasks: TaskStore::default(),
        conversations,
        llm,
    };

    let routes = configure_routes(ctx);

    println!("Starting server on http://127.0.0.1:8000");
    warp::serve(routes).run(([127, 0, 0, 1], 8000)).await;
}
