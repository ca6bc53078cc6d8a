//! In-memory task store
//!
//! Holds the ordered task list and the id counter behind one explicit handle
//! that is cloned into request handlers. Ids are assigned sequentially from 1
//! and never reused within a process lifetime.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{Task, TaskInput};

use super::error::{Result, StoreError};

#[derive(Default)]
struct TaskStoreInner {
    tasks: Vec<Task>,
    last_id: u64,
}

/// Process-wide task collection
#[derive(Clone, Default)]
pub struct TaskStore {
    inner: Arc<Mutex<TaskStoreInner>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TaskStoreInner> {
        // A poisoned lock means a handler panicked mid-update; the list is
        // unrecoverable either way.
        self.inner.lock().expect("task store lock poisoned")
    }

    /// All tasks in creation order
    pub fn list(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Assign the next id and append the task
    pub fn create(&self, input: TaskInput) -> Task {
        let mut inner = self.lock();
        inner.last_id += 1;

        let task = Task {
            id: inner.last_id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            completed: input.completed,
        };

        inner.tasks.push(task.clone());
        task
    }

    /// Replace the task with the given id in place, preserving its position
    pub fn update(&self, id: u64, input: TaskInput) -> Result<Task> {
        let mut inner = self.lock();

        let slot = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound("Task"))?;

        *slot = Task {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            completed: input.completed,
        };

        Ok(slot.clone())
    }

    /// Remove the task with the given id
    pub fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.lock();

        let position = inner
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound("Task"))?;

        inner.tasks.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: None,
            due_date: None,
            completed: false,
        }
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let store = TaskStore::new();
        let a = store.create(input("a"));
        let b = store.create(input("b"));
        store.delete(b.id).unwrap();
        let c = store.create(input("c"));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        // Deleted ids are never reused
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_create_appends_in_order() {
        let store = TaskStore::new();
        store.create(input("first"));
        store.create(input("second"));

        let tasks = store.list();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "first");
        assert_eq!(tasks[1].title, "second");
    }

    #[test]
    fn test_update_preserves_position_and_id() {
        let store = TaskStore::new();
        store.create(input("a"));
        let b = store.create(input("b"));
        store.create(input("c"));

        let updated = store
            .update(
                b.id,
                TaskInput {
                    title: "b2".to_string(),
                    description: Some("revised".to_string()),
                    due_date: Some("2026-09-01".to_string()),
                    completed: true,
                },
            )
            .unwrap();

        assert_eq!(updated.id, b.id);
        assert!(updated.completed);

        let tasks = store.list();
        assert_eq!(tasks[1].title, "b2");
        assert_eq!(tasks[1].description.as_deref(), Some("revised"));
    }

    #[test]
    fn test_update_unknown_id_leaves_list_unchanged() {
        let store = TaskStore::new();
        store.create(input("only"));
        let before = store.list();

        let err = store.update(99, input("ghost")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_delete_unknown_id() {
        let store = TaskStore::new();
        let err = store.delete(1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_removes_only_matching_task() {
        let store = TaskStore::new();
        let a = store.create(input("a"));
        let b = store.create(input("b"));

        store.delete(a.id).unwrap();

        let tasks = store.list();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, b.id);
    }
}
