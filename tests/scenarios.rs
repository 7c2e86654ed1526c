use serde_json::json;
use taskboard::codec::{self, TaskCandidate};
use taskboard::dashboard::Dashboard;
use taskboard::filter::{self, TaskFilter};
use taskboard::sort;
use taskboard::stats;
use taskboard::storage::{FileStore, KvStore, LoadOutcome, MemoryStore, PersistStatus};
use taskboard::task::{Priority, TaskDraft, TaskStatus};
use taskboard::{Error, TaskPatch, TaskRepository};

fn ids(tasks: &[taskboard::Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.clone()).collect()
}

fn two_task_board() -> (TaskRepository, String, String) {
    let mut repo = TaskRepository::new();
    let first = repo.create(TaskDraft::new("Task 1").priority(Priority::High));
    let second = repo.create(
        TaskDraft::new("Task 2")
            .priority(Priority::Low)
            .actual_time(30),
    );
    repo.set_status(&second.id, TaskStatus::Done)
        .expect("set status");
    (repo, first.id, second.id)
}

#[test]
fn stats_for_two_task_board() {
    let (repo, _, _) = two_task_board();
    let stats = stats::compute(repo.tasks());
    assert_eq!(
        serde_json::to_value(stats).expect("json"),
        json!({
            "total": 2,
            "completed": 1,
            "inProgress": 0,
            "completionRate": 50.0,
            "avgCompletionTime": 30.0
        })
    );
}

#[test]
fn done_filter_returns_only_finished_task() {
    let (repo, _, second) = two_task_board();
    let filter = TaskFilter {
        status: vec![TaskStatus::Done],
        ..TaskFilter::default()
    };
    let matched = filter::apply(repo.tasks(), &filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, second);
}

#[test]
fn grouping_for_two_task_board() {
    let (repo, first, second) = two_task_board();
    let grouped = sort::group_by_status(&sort::sorted(repo.tasks()));
    assert_eq!(ids(&grouped.to_do), vec![first]);
    assert!(grouped.in_progress.is_empty());
    assert_eq!(ids(&grouped.done), vec![second]);
}

#[test]
fn import_of_bare_title_adds_nothing() {
    let mut repo = TaskRepository::new();
    let report = repo.import_batch(vec![TaskCandidate::new(json!({ "title": "x" }))]);
    assert_eq!(report.imported, 0);
    assert_eq!(report.rejected, 1);
    assert!(repo.is_empty());
}

#[test]
fn blank_title_task_survives_export_and_import() {
    let mut repo = TaskRepository::new();
    repo.create(TaskDraft::new("   "));
    let text = codec::export_tasks(repo.tasks()).expect("export");

    let mut copy = TaskRepository::new();
    let report = copy.import_batch(codec::import_tasks(&text));
    assert_eq!(report.imported, 1);
    assert_eq!(report.rejected, 0);
    assert_eq!(copy.tasks(), repo.tasks());
}

#[test]
fn completed_at_follows_created_at() {
    let (repo, _, second) = two_task_board();
    let task = repo.get(&second).expect("task");
    let completed_at = task.completed_at.expect("completed");
    assert!(completed_at >= task.created_at);
}

#[test]
fn update_of_unknown_id_leaves_collection_untouched() {
    let (mut repo, _, _) = two_task_board();
    let before = repo.tasks().to_vec();
    let err = repo
        .update(
            "missing",
            TaskPatch {
                title: Some("nope".to_string()),
                ..TaskPatch::default()
            },
        )
        .expect_err("unknown id");
    assert!(matches!(err, Error::TaskNotFound(id) if id == "missing"));
    assert_eq!(repo.tasks(), before.as_slice());
}

#[test]
fn file_backed_dashboard_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let id = {
        let mut dashboard = Dashboard::open(FileStore::new(dir.path()));
        assert_eq!(dashboard.load_outcome(), &LoadOutcome::Missing);
        let (task, status) = dashboard.create(TaskDraft::new("Persisted").category("work"));
        assert_eq!(status, PersistStatus::Saved);
        task.id
    };

    let dashboard = Dashboard::open(FileStore::new(dir.path()));
    assert_eq!(dashboard.load_outcome(), &LoadOutcome::Loaded);
    assert_eq!(dashboard.tasks().len(), 1);
    assert_eq!(dashboard.tasks()[0].id, id);
}

#[test]
fn dashboard_round_trips_through_export() {
    let kv = MemoryStore::new();
    let mut dashboard = Dashboard::open(&kv);
    dashboard.create(TaskDraft::new("A").tag("x"));
    dashboard.create(TaskDraft::new("B").priority(Priority::High));
    let text = codec::export_tasks(dashboard.tasks()).expect("export");

    let other = MemoryStore::new();
    let mut copy = Dashboard::open(&other);
    let (report, status) = copy.import_batch(codec::import_tasks(&text));
    assert_eq!(report.imported, 2);
    assert!(status.is_saved());
    assert_eq!(copy.tasks(), dashboard.tasks());
    assert!(other.get("tasks").expect("get").is_some());
}
