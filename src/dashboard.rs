//! Repository plus persistence behind one handle.
//!
//! Every mutation is applied in memory first and then the whole collection is
//! written back. A failed write never undoes the mutation; it is reported as a
//! [`PersistStatus`] next to the mutation result.

use serde::Serialize;

use crate::codec::TaskCandidate;
use crate::error::Result;
use crate::filter::{self, TaskFilter};
use crate::repository::{ImportReport, TaskRepository};
use crate::sort::{self, TasksByStatus};
use crate::stats::{self, TaskStats};
use crate::storage::{KvStore, LoadOutcome, PersistStatus, TaskStore};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

/// Read model rendered by front ends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Filtered tasks in display order
    pub tasks: Vec<Task>,
    pub tasks_by_status: TasksByStatus,
    pub stats: TaskStats,
}

pub struct Dashboard<S> {
    repository: TaskRepository,
    store: TaskStore<S>,
    load_outcome: LoadOutcome,
}

impl<S: KvStore> Dashboard<S> {
    /// Open over `kv` using the default storage key.
    pub fn open(kv: S) -> Self {
        Self::from_store(TaskStore::new(kv))
    }

    pub fn from_store(store: TaskStore<S>) -> Self {
        let (tasks, load_outcome) = store.load();
        Self {
            repository: TaskRepository::from_tasks(tasks),
            store,
            load_outcome,
        }
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.repository
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.repository.tasks()
    }

    pub fn resolve_id(&self, input: &str) -> Result<String> {
        self.repository.resolve_id(input)
    }

    pub fn create(&mut self, draft: TaskDraft) -> (Task, PersistStatus) {
        let task = self.repository.create(draft);
        (task, self.persist())
    }

    /// Unknown ids fail without touching storage.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<(Task, PersistStatus)> {
        let task = self.repository.update(id, patch)?;
        Ok((task, self.persist()))
    }

    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<(Task, PersistStatus)> {
        let task = self.repository.set_status(id, status)?;
        Ok((task, self.persist()))
    }

    pub fn delete(&mut self, id: &str) -> (Option<Task>, PersistStatus) {
        let removed = self.repository.delete(id);
        (removed, self.persist())
    }

    pub fn import_batch(&mut self, candidates: Vec<TaskCandidate>) -> (ImportReport, PersistStatus) {
        let report = self.repository.import_batch(candidates);
        (report, self.persist())
    }

    /// Filtered, sorted, grouped tasks plus stats over the filtered set.
    pub fn view(&self, filter: &TaskFilter) -> DashboardView {
        let mut tasks = filter::apply(self.repository.tasks(), filter);
        sort::sort_tasks(&mut tasks);
        DashboardView {
            tasks_by_status: sort::group_by_status(&tasks),
            stats: stats::compute(&tasks),
            tasks,
        }
    }

    fn persist(&self) -> PersistStatus {
        self.store.save(self.repository.tasks())
    }
}
