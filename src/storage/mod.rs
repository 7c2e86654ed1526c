//! Storage layer for taskboard
//!
//! The whole task collection lives under a single key of a byte-oriented
//! key-value store:
//!
//! ```text
//! <data dir>/
//!   taskboard.toml        # optional configuration
//!   tasks.json            # key "tasks": the full collection as JSON
//!   tasks.json.lock       # advisory lock taken around writes
//! ```
//!
//! Reads never fail towards the caller: a missing key or an unparseable value
//! yields an empty collection, and [`LoadOutcome`] says which case occurred.
//! Records are decoded one by one with the import rules, so a record from an
//! older file without `updatedAt` still loads. Writes overwrite the key with
//! the full collection.

mod file;
mod memory;

pub use file::{FileStore, DEFAULT_LOCK_TIMEOUT_MS};
pub use memory::MemoryStore;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::codec::TaskCandidate;
use crate::error::Result;
use crate::task::Task;

/// Default key holding the serialized task collection
pub const TASKS_KEY: &str = "tasks";

/// A byte-oriented key-value store.
///
/// `set` either fully replaces the value or fails without touching it.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}

/// How a collection load resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The key held a valid collection
    Loaded,
    /// Nothing stored yet
    Missing,
    /// Some stored records could not be decoded and were left out
    Partial { skipped: usize },
    /// The stored value could not be read or parsed; treated as empty
    Corrupt(String),
}

/// Result of persisting the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum PersistStatus {
    Saved,
    Failed(String),
}

impl PersistStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistStatus::Saved)
    }
}

/// Persistence adapter for the task collection
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
    kv: S,
    key: String,
}

impl<S: KvStore> TaskStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, TASKS_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Load the collection. Never fails: problems degrade to an empty list.
    pub fn load(&self) -> (Vec<Task>, LoadOutcome) {
        let bytes = match self.kv.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(target: "taskboard::storage", key = %self.key, "no stored tasks");
                return (Vec::new(), LoadOutcome::Missing);
            }
            Err(err) => {
                tracing::warn!(target: "taskboard::storage", key = %self.key, error = %err, "failed to read tasks");
                return (Vec::new(), LoadOutcome::Corrupt(err.to_string()));
            }
        };

        let records = match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(target: "taskboard::storage", key = %self.key, error = %err, "stored tasks are not a JSON array");
                return (Vec::new(), LoadOutcome::Corrupt(err.to_string()));
            }
        };

        let now = Utc::now();
        let mut tasks = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for record in records {
            match TaskCandidate::new(record).into_task(now) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(target: "taskboard::storage", key = %self.key, error = %err, "skipped stored record");
                }
            }
        }

        tracing::debug!(target: "taskboard::storage", key = %self.key, count = tasks.len(), skipped, "loaded tasks");
        if skipped == 0 {
            (tasks, LoadOutcome::Loaded)
        } else {
            (tasks, LoadOutcome::Partial { skipped })
        }
    }

    /// Overwrite the stored collection. Never fails: errors are logged and reported.
    pub fn save(&self, tasks: &[Task]) -> PersistStatus {
        match self.try_save(tasks) {
            Ok(()) => PersistStatus::Saved,
            Err(err) => {
                tracing::warn!(target: "taskboard::storage", key = %self.key, error = %err, "failed to save tasks");
                PersistStatus::Failed(err.to_string())
            }
        }
    }

    /// Overwrite the stored collection, propagating the failure.
    pub fn try_save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_vec(tasks)?;
        self.kv.set(&self.key, &json)?;
        tracing::debug!(target: "taskboard::storage", key = %self.key, count = tasks.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::task::TaskDraft;

    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(Error::Persistence("disk unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(Error::Persistence("quota exceeded".to_string()))
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = TaskStore::new(MemoryStore::new());
        let (tasks, outcome) = store.load();
        assert!(tasks.is_empty());
        assert_eq!(outcome, LoadOutcome::Missing);
    }

    #[test]
    fn corrupt_value_loads_empty() {
        let kv = MemoryStore::new();
        kv.set(TASKS_KEY, b"{not json").expect("set");
        let store = TaskStore::new(kv);
        let (tasks, outcome) = store.load();
        assert!(tasks.is_empty());
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
    }

    #[test]
    fn records_without_updated_at_still_load() {
        let kv = MemoryStore::new();
        let stored = serde_json::json!([
            {
                "id": "a1",
                "title": "Legacy",
                "priority": "tinggi",
                "status": "to-do",
                "createdAt": "2024-01-02T08:00:00Z"
            },
            {
                "id": "b2",
                "title": "Current",
                "priority": "rendah",
                "status": "done",
                "createdAt": "2024-01-03T08:00:00Z",
                "updatedAt": "2024-01-04T08:00:00Z"
            }
        ]);
        kv.set(TASKS_KEY, stored.to_string().as_bytes()).expect("set");

        let store = TaskStore::new(&kv);
        let (tasks, outcome) = store.load();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].updated_at, tasks[0].created_at);

        let mut tasks = tasks;
        tasks.push(Task::from_draft(TaskDraft::new("New"), Utc::now()));
        assert!(store.save(&tasks).is_saved());
        let (reloaded, _) = store.load();
        let ids: Vec<&str> = reloaded.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(&ids[..2], &["a1", "b2"]);
        assert_eq!(reloaded.len(), 3);
    }

    #[test]
    fn undecodable_records_are_skipped_not_fatal() {
        let kv = MemoryStore::new();
        let stored = serde_json::json!([
            { "id": "a1", "title": "Keep", "priority": "sedang", "status": "to-do" },
            { "title": "no id" },
            { "id": "c3", "title": "Bad", "priority": "urgent", "status": "to-do" }
        ]);
        kv.set(TASKS_KEY, stored.to_string().as_bytes()).expect("set");

        let (tasks, outcome) = TaskStore::new(kv).load();
        assert_eq!(outcome, LoadOutcome::Partial { skipped: 2 });
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "a1");
    }

    #[test]
    fn non_array_value_is_corrupt() {
        let kv = MemoryStore::new();
        kv.set(TASKS_KEY, b"{\"id\":\"a1\"}").expect("set");
        let (tasks, outcome) = TaskStore::new(kv).load();
        assert!(tasks.is_empty());
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = TaskStore::new(MemoryStore::new());
        let task = Task::from_draft(TaskDraft::new("persist me"), Utc::now());
        assert!(store.save(std::slice::from_ref(&task)).is_saved());

        let (tasks, outcome) = store.load();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(tasks, vec![task]);
    }

    #[test]
    fn failures_are_reported_not_raised() {
        let store = TaskStore::new(BrokenStore);
        let (tasks, outcome) = store.load();
        assert!(tasks.is_empty());
        assert!(matches!(outcome, LoadOutcome::Corrupt(reason) if reason.contains("disk unavailable")));

        let status = store.save(&[]);
        assert!(matches!(status, PersistStatus::Failed(reason) if reason.contains("quota exceeded")));
    }

    #[test]
    fn custom_key_is_used() {
        let kv = MemoryStore::new();
        let store = TaskStore::with_key(&kv, "board-2");
        assert!(store.save(&[]).is_saved());
        assert!(kv.get("board-2").expect("get").is_some());
        assert!(kv.get(TASKS_KEY).expect("get").is_none());
    }
}
