mod support;

use predicates::str::contains;

use support::{titles, TestBoard};

fn seed(board: &TestBoard) {
    board.add(&[
        "Write report",
        "--priority",
        "high",
        "--category",
        "work",
        "--tag",
        "writing",
        "--assignee",
        "ana",
        "--due",
        "2024-03-10",
    ]);
    board.add(&[
        "Groceries",
        "--priority",
        "low",
        "--category",
        "home",
        "--description",
        "milk and eggs",
        "--due",
        "2024-03-20",
    ]);
    board.add(&["Inbox zero", "--category", "work", "--tag", "admin"]);
}

#[test]
fn list_filters_combine() {
    let board = TestBoard::new();
    seed(&board);

    let by_category = board.json(&["list", "--category", "work"]);
    assert_eq!(
        titles(&by_category["data"]["tasks"]),
        vec!["Write report", "Inbox zero"]
    );

    let by_search = board.json(&["list", "--search", "EGGS"]);
    assert_eq!(titles(&by_search["data"]["tasks"]), vec!["Groceries"]);

    let by_due = board.json(&["list", "--due-from", "2024-03-15"]);
    assert_eq!(titles(&by_due["data"]["tasks"]), vec!["Groceries"]);

    let by_tag_and_priority = board.json(&["list", "--tag", "admin,writing", "--priority", "medium"]);
    assert_eq!(
        titles(&by_tag_and_priority["data"]["tasks"]),
        vec!["Inbox zero"]
    );
}

#[test]
fn bad_filter_date_is_rejected() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["list", "--due-to", "soon"])
        .assert()
        .code(2)
        .stderr(contains("invalid date"));
}

#[test]
fn stats_respect_filters() {
    let board = TestBoard::new();
    seed(&board);

    let value = board.json(&["stats", "--category", "home"]);
    assert_eq!(value["command"], "stats");
    assert_eq!(value["data"]["total"], 1);
    assert_eq!(value["data"]["completionRate"], 0.0);
}

#[test]
fn analytics_reports_breakdowns() {
    let board = TestBoard::new();
    seed(&board);
    let value = board.json(&["list", "--search", "inbox"]);
    let id = value["data"]["tasks"][0]["id"].as_str().expect("id").to_string();
    board.json(&["done", &id]);

    let value = board.json(&["analytics"]);
    let data = &value["data"];
    assert_eq!(data["stats"]["completed"], 1);
    assert_eq!(data["completedThisWeek"], 1);
    assert_eq!(data["weeklyShare"], 100.0);
    assert_eq!(data["avgTasksPerDay"], 0.1);
    // round(33.33 * 0.6 + 1 * 10 * 0.4) = 24
    assert_eq!(data["productivityScore"], 24);
    assert_eq!(data["byPriority"][0]["priority"], "tinggi");
    assert_eq!(data["topCategories"][0]["category"], "work");
    assert_eq!(data["topCategories"][0]["count"], 2);
}

#[test]
fn analytics_honours_configured_top_categories() {
    let board = TestBoard::new();
    board.write_file("taskboard.toml", "[analytics]\ntop_categories = 1\n");
    seed(&board);

    let value = board.json(&["analytics"]);
    let categories = value["data"]["topCategories"].as_array().expect("categories");
    assert_eq!(categories.len(), 1);
}

#[test]
fn calendar_places_tasks_on_due_days() {
    let board = TestBoard::new();
    seed(&board);

    let value = board.json(&["calendar", "--month", "2024-03"]);
    let month = &value["data"]["month"];
    assert_eq!(month["year"], 2024);
    assert_eq!(month["month"], 3);

    let cells = month["cells"].as_array().expect("cells");
    // 2024-03-01 is a Friday.
    assert!(cells[..5].iter().all(|cell| cell.is_null()));
    let tenth = cells
        .iter()
        .find(|cell| cell["date"] == "2024-03-10")
        .expect("day 10");
    assert_eq!(titles(&tenth["tasks"]), vec!["Write report"]);

    board
        .cmd()
        .args(["calendar", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Calendar 2024-03"))
        .stdout(contains("Su Mo Tu We Th Fr Sa"))
        .stdout(contains("Due 2024-03-20 (1):\n  [to-do][low]"));
}

#[test]
fn calendar_rejects_bad_month() {
    let board = TestBoard::new();
    board
        .cmd()
        .args(["calendar", "--month", "2024-13"])
        .assert()
        .code(2);
}

#[test]
fn facets_list_distinct_values() {
    let board = TestBoard::new();
    seed(&board);

    let value = board.json(&["facets"]);
    assert_eq!(value["data"]["categories"], serde_json::json!(["work", "home"]));
    assert_eq!(value["data"]["tags"], serde_json::json!(["writing", "admin"]));
    assert_eq!(value["data"]["assignees"], serde_json::json!(["ana"]));
}
