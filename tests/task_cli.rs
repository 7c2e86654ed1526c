mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{titles, TestBoard};

#[test]
fn add_then_list_orders_by_priority() {
    let board = TestBoard::new();
    board.add(&["Low chore", "--priority", "low"]);
    board.add(&["Urgent fix", "--priority", "high", "--tag", "bug,prod"]);
    board.add(&["Normal work"]);

    let value = board.json(&["list"]);
    assert_eq!(value["schema_version"], "taskboard.v1");
    assert_eq!(value["command"], "list");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["total"], 3);
    assert_eq!(
        titles(&value["data"]["tasks"]),
        vec!["Urgent fix", "Normal work", "Low chore"]
    );

    let urgent = &value["data"]["tasks"][0];
    assert_eq!(urgent["priority"], "tinggi");
    assert_eq!(urgent["status"], "to-do");
    assert_eq!(urgent["tags"], serde_json::json!(["bug", "prod"]));
    assert!(board.tasks_file().exists());
}

#[test]
fn add_uses_configured_defaults() {
    let board = TestBoard::new();
    board.write_file(
        "taskboard.toml",
        "[tasks]\ndefault_priority = \"high\"\ndefault_status = \"in-progress\"\n",
    );
    board.add(&["Configured"]);

    let value = board.json(&["list"]);
    let task = &value["data"]["tasks"][0];
    assert_eq!(task["priority"], "tinggi");
    assert_eq!(task["status"], "in-progress");
}

#[test]
fn add_rejects_blank_title() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["add", "   "])
        .assert()
        .code(2)
        .stderr(contains("title cannot be empty"));
}

#[test]
fn done_stamps_completion_and_stats_follow() {
    let board = TestBoard::new();
    board.add(&["Task 1", "--priority", "high"]);
    let second = board.add(&["Task 2", "--priority", "low"]);

    let done = board.json(&["done", &second, "--actual", "30"]);
    assert_eq!(done["command"], "done");
    assert_eq!(done["data"]["status"], "done");
    assert_eq!(done["data"]["actualTime"], 30);
    assert!(done["data"]["completedAt"].is_string());

    let stats = board.json(&["stats"]);
    assert_eq!(
        stats["data"],
        serde_json::json!({
            "total": 2,
            "completed": 1,
            "inProgress": 0,
            "completionRate": 50.0,
            "avgCompletionTime": 30.0
        })
    );

    let filtered = board.json(&["list", "--status", "done"]);
    assert_eq!(titles(&filtered["data"]["tasks"]), vec!["Task 2"]);
}

#[test]
fn grouped_list_has_every_bucket() {
    let board = TestBoard::new();
    board.add(&["Task 1", "--priority", "high"]);
    let second = board.add(&["Task 2", "--priority", "low"]);
    board.json(&["status", &second, "done"]);

    let value = board.json(&["list", "--grouped"]);
    let grouped = &value["data"]["tasksByStatus"];
    assert_eq!(titles(&grouped["to-do"]), vec!["Task 1"]);
    assert!(grouped["in-progress"].as_array().expect("bucket").is_empty());
    assert_eq!(titles(&grouped["done"]), vec!["Task 2"]);
}

#[test]
fn leaving_done_keeps_completed_at() {
    let board = TestBoard::new();
    let id = board.add(&["Reopen me"]);
    let done = board.json(&["done", &id]);
    let completed_at = done["data"]["completedAt"].clone();

    let reopened = board.json(&["status", &id, "in-progress"]);
    assert_eq!(reopened["data"]["status"], "in-progress");
    assert_eq!(reopened["data"]["completedAt"], completed_at);
}

#[test]
fn update_and_show_by_prefix() {
    let board = TestBoard::new();
    let id = board.add(&["Draft", "--category", "work", "--due", "2024-05-01"]);
    let prefix = &id[..20];

    let updated = board.json(&[
        "update",
        prefix,
        "--title",
        "Final",
        "--assignee",
        "ana",
        "--clear-category",
    ]);
    assert_eq!(updated["data"]["id"], id.as_str());
    assert_eq!(updated["data"]["title"], "Final");
    assert_eq!(updated["data"]["assignee"], "ana");
    assert!(updated["data"].get("category").map_or(true, Value::is_null));

    let shown = board.json(&["show", &id]);
    assert_eq!(shown["data"]["title"], "Final");
    assert_eq!(shown["data"]["dueDate"], "2024-05-01");

    board
        .cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Title: Final"))
        .stdout(contains("Due: 2024-05-01"));
}

#[test]
fn update_without_fields_is_rejected() {
    let board = TestBoard::new();
    let id = board.add(&["Untouched"]);
    board
        .cmd()
        .args(["update", &id])
        .assert()
        .code(2)
        .stderr(contains("nothing to update"));
}

#[test]
fn rm_removes_task() {
    let board = TestBoard::new();
    let keep = board.add(&["Keep"]);
    let drop = board.add(&["Drop"]);

    let removed = board.json(&["rm", &drop]);
    assert_eq!(removed["data"]["id"], drop.as_str());
    assert_eq!(removed["data"]["deleted"], true);

    let value = board.json(&["list"]);
    assert_eq!(value["data"]["total"], 1);
    assert_eq!(value["data"]["tasks"][0]["id"], keep.as_str());
}

#[test]
fn unknown_task_is_a_user_error() {
    let board = TestBoard::new();
    board.add(&["Only task"]);

    let output = board
        .cmd()
        .args(["--json", "show", "zzzzzz"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("error envelope");
    assert_eq!(value["status"], "error");
    assert_eq!(value["command"], "show");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(value["error"]["details"]["id"], "zzzzzz");
    assert_eq!(value["next_steps"][0], "tb list");
}

#[test]
fn quiet_suppresses_human_output() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["--quiet", "add", "Silent"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

#[test]
fn corrupt_store_degrades_to_empty_board() {
    let board = TestBoard::new();
    std::fs::write(board.tasks_file(), "{ not json").expect("write");

    let value = board.json(&["list"]);
    assert_eq!(value["data"]["total"], 0);
    let warnings = value["warnings"].as_array().expect("warnings");
    assert!(warnings[0]
        .as_str()
        .expect("warning")
        .contains("could not be read"));
}

#[test]
fn stored_records_without_updated_at_survive_a_change() {
    let board = TestBoard::new();
    std::fs::write(
        board.tasks_file(),
        r#"[
  {"id":"01legacy0000000000000000aa","title":"Old one","priority":"tinggi","status":"to-do","createdAt":"2024-01-02T08:00:00Z"},
  {"id":"01legacy0000000000000000bb","title":"Old two","priority":"rendah","status":"done","createdAt":"2024-01-03T08:00:00Z"}
]"#,
    )
    .expect("write");

    board.add(&["Fresh"]);

    let value = board.json(&["list"]);
    assert_eq!(value["data"]["total"], 3);
    assert!(value.get("warnings").is_none());
    let mut listed = titles(&value["data"]["tasks"]);
    listed.sort();
    assert_eq!(listed, vec!["Fresh", "Old one", "Old two"]);
}

#[test]
fn grouped_list_prints_each_bucket() {
    let board = TestBoard::new();
    board.add(&["Open item"]);

    board
        .cmd()
        .args(["list", "--grouped"])
        .assert()
        .success()
        .stdout(contains("to-do (1):\n  [to-do][medium]"))
        .stdout(contains("in-progress (0):\n  (none)"))
        .stdout(contains("done (0):"));
}
