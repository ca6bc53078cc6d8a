use std::path::PathBuf;
use std::time::Duration;

use timedesk::models::Role;
use timedesk::store::ConversationStore;
use uuid::Uuid;

/// SQLite file in the system temp dir, removed when the test finishes
struct TempDb {
    path: PathBuf,
}

impl TempDb {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("timedesk-test-{}.db", Uuid::new_v4()));
        Self { path }
    }

    fn open(&self) -> ConversationStore {
        ConversationStore::open(&self.path).expect("Failed to open conversation store")
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[test]
fn test_create_and_get_conversation() {
    let db = TempDb::new();
    let store = db.open();

    let created = store
        .create("New Conversation", "deepseek-chat")
        .expect("Failed to create conversation");
    assert!(created.messages.is_empty());

    let fetched = store
        .get(&created.conversation.id)
        .expect("Failed to get conversation");

    assert_eq!(fetched.conversation.id, created.conversation.id);
    assert_eq!(fetched.conversation.title, "New Conversation");
    assert_eq!(
        fetched.conversation.model.as_deref(),
        Some("deepseek-chat")
    );
    assert!(fetched.messages.is_empty());
}

#[test]
fn test_get_unknown_conversation_is_not_found() {
    let db = TempDb::new();
    let store = db.open();

    let result = store.get("no-such-id");
    assert!(result.is_err());
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_list_orders_by_most_recently_updated() {
    let db = TempDb::new();
    let store = db.open();

    let first = store.create("first", "deepseek-chat").unwrap();
    std::thread::sleep(Duration::from_millis(5));
    let second = store.create("second", "deepseek-chat").unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.conversation.id);
    assert_eq!(listed[1].id, first.conversation.id);

    // Recording a turn on the older conversation moves it to the front
    std::thread::sleep(Duration::from_millis(5));
    store
        .record_user_turn(&first.conversation.id, "hello")
        .unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed[0].id, first.conversation.id);
}

#[test]
fn test_rename_updates_title_only() {
    let db = TempDb::new();
    let store = db.open();

    let created = store.create("before", "deepseek-chat").unwrap();
    store.rename(&created.conversation.id, "after").unwrap();

    let fetched = store.get(&created.conversation.id).unwrap();
    assert_eq!(fetched.conversation.title, "after");
    assert_eq!(
        fetched.conversation.model.as_deref(),
        Some("deepseek-chat")
    );
}

#[test]
fn test_rename_unknown_conversation_is_not_found() {
    let db = TempDb::new();
    let store = db.open();

    let result = store.rename("no-such-id", "title");
    assert!(result.is_err());
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_record_turns_in_order() {
    let db = TempDb::new();
    let store = db.open();

    let created = store.create("New Conversation", "deepseek-chat").unwrap();
    let id = &created.conversation.id;

    store.record_user_turn(id, "what should I do today?").unwrap();
    store
        .record_assistant_turn(id, "Start with your hardest task.", "what should I do today?", "deepseek-chat")
        .unwrap();

    let fetched = store.get(id).unwrap();
    assert_eq!(fetched.messages.len(), 2);
    assert_eq!(fetched.messages[0].role, Role::User);
    assert_eq!(fetched.messages[0].content, "what should I do today?");
    assert_eq!(fetched.messages[1].role, Role::Assistant);
    assert_eq!(fetched.messages[1].content, "Start with your hardest task.");
}

#[test]
fn test_first_exchange_sets_title_from_user_message() {
    let db = TempDb::new();
    let store = db.open();

    let created = store.create("New Conversation", "deepseek-chat").unwrap();
    let id = &created.conversation.id;

    let long_message = "please help me plan out the rest of my very busy week";
    store.record_user_turn(id, long_message).unwrap();
    store
        .record_assistant_turn(id, "Sure.", long_message, "deepseek-chat")
        .unwrap();

    let fetched = store.get(id).unwrap();
    assert_eq!(fetched.conversation.title, "please help me plan out the re...");
}

#[test]
fn test_later_exchanges_leave_title_alone() {
    let db = TempDb::new();
    let store = db.open();

    let created = store.create("New Conversation", "deepseek-chat").unwrap();
    let id = &created.conversation.id;

    store.record_user_turn(id, "first question").unwrap();
    store
        .record_assistant_turn(id, "first answer", "first question", "deepseek-chat")
        .unwrap();
    store.record_user_turn(id, "second question").unwrap();
    store
        .record_assistant_turn(id, "second answer", "second question", "deepseek-chat")
        .unwrap();

    let fetched = store.get(id).unwrap();
    assert_eq!(fetched.conversation.title, "first question");
    assert_eq!(fetched.messages.len(), 4);
}

#[test]
fn test_assistant_turn_overwrites_stored_model() {
    let db = TempDb::new();
    let store = db.open();

    let created = store.create("New Conversation", "deepseek-chat").unwrap();
    let id = &created.conversation.id;

    store.record_user_turn(id, "think hard about this").unwrap();
    store
        .record_assistant_turn(id, "done", "think hard about this", "deepseek-reasoner")
        .unwrap();

    let fetched = store.get(id).unwrap();
    assert_eq!(
        fetched.conversation.model.as_deref(),
        Some("deepseek-reasoner")
    );
}

#[test]
fn test_delete_cascades_to_messages() {
    let db = TempDb::new();
    let store = db.open();

    let created = store.create("New Conversation", "deepseek-chat").unwrap();
    let id = created.conversation.id.clone();

    store.record_user_turn(&id, "hello").unwrap();
    store
        .record_assistant_turn(&id, "hi", "hello", "deepseek-chat")
        .unwrap();

    store.delete(&id).unwrap();

    let result = store.get(&id);
    assert!(result.is_err());
    assert!(result.unwrap_err().is_not_found());

    // The cascade leaves no orphaned message rows behind
    let conn = rusqlite::Connection::open(&db.path).unwrap();
    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM messages WHERE conversation_id = ?1",
            rusqlite::params![id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn test_delete_unknown_conversation_is_not_found() {
    let db = TempDb::new();
    let store = db.open();

    let result = store.delete("no-such-id");
    assert!(result.is_err());
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_reopen_preserves_data() {
    let db = TempDb::new();
    let id = {
        let store = db.open();
        let created = store.create("persisted", "deepseek-chat").unwrap();
        store.record_user_turn(&created.conversation.id, "hello").unwrap();
        created.conversation.id
    };

    let store = db.open();
    let fetched = store.get(&id).unwrap();
    assert_eq!(fetched.conversation.title, "persisted");
    assert_eq!(fetched.messages.len(), 1);
}
