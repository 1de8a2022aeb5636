mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{titles, TestRoot};

#[test]
fn init_creates_config_and_collection() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::new();

    let value = root.json(&["init"]);
    assert_eq!(value["schema_version"], "daybook.v1");
    assert_eq!(value["command"], "init");
    assert_eq!(value["data"]["created"]["config"], true);
    assert!(root.path().join(".daybook.toml").is_file());
    assert!(root.tasks_file().is_file());

    let again = root.json(&["init"]);
    assert_eq!(again["data"]["created"]["config"], false);
    assert_eq!(again["data"]["created"]["tasks_file"], false);
    Ok(())
}

#[test]
fn new_then_show_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let root = TestRoot::new();
    let created = root.json(&[
        "new",
        "  Dentist ",
        "--date",
        "2024-03-05",
        "--start",
        "15:00",
        "--end",
        "16:00",
        "--type",
        "health",
        "--description",
        "checkup",
    ]);
    let data = &created["data"];
    assert_eq!(created["status"], "success");
    assert_eq!(data["title"], "Dentist");
    assert_eq!(data["status"], "pending");
    assert_eq!(data["type"], "health");
    assert_eq!(data["startTime"], "15:00");
    assert!(data["createdAt"].is_string());

    let id = data["id"].as_str().expect("id");
    let shown = root.json(&["show", &id[..12]]);
    assert_eq!(shown["data"], *data);

    let stored = root.read_tasks()?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    Ok(())
}

#[test]
fn day_lists_tasks_by_start_time() {
    let root = TestRoot::new();
    root.new_task("late", "2024-03-01", "18:00", "19:00");
    root.new_task("early", "2024-03-01", "07:00", "08:00");
    root.new_task("tomorrow", "2024-03-02", "06:00", "07:00");

    let value = root.json(&["day", "--date", "2024-03-01"]);
    assert_eq!(titles(&value), vec!["early", "late"]);
    assert_eq!(value["data"]["window"]["start"], "2024-03-01");
}

#[test]
fn week_uses_sunday_start() {
    let root = TestRoot::new();
    root.new_task("sat-before", "2024-03-09", "09:00", "10:00");
    root.new_task("sunday", "2024-03-10", "09:00", "10:00");
    root.new_task("thursday", "2024-03-14", "09:00", "10:00");
    root.new_task("saturday", "2024-03-16", "09:00", "10:00");
    root.new_task("sun-after", "2024-03-17", "09:00", "10:00");

    let value = root.json(&["week", "--date", "2024-03-14"]);
    assert_eq!(value["data"]["window"]["start"], "2024-03-10");
    assert_eq!(value["data"]["window"]["end"], "2024-03-16");
    assert_eq!(titles(&value), vec!["sunday", "thursday", "saturday"]);
    assert!(value["data"].get("days").is_none());

    let grid = root.json(&["week", "--date", "2024-03-14", "--grid"]);
    let days = grid["data"]["days"].as_array().expect("days");
    assert_eq!(days.len(), 7);
    assert_eq!(days[4]["date"], "2024-03-14");
    assert_eq!(days[4]["tasks"].as_array().expect("tasks").len(), 1);
}

#[test]
fn month_uses_loose_upper_bound_and_grid() {
    let root = TestRoot::new();
    root.new_task("leap", "2024-02-29", "09:00", "10:00");
    root.new_task("first", "2024-02-01", "09:00", "10:00");
    root.new_task("march", "2024-03-01", "09:00", "10:00");

    let value = root.json(&["month", "--year", "2024", "--month", "2", "--grid"]);
    assert_eq!(value["data"]["window"]["end"], "2024-02-31");
    assert_eq!(titles(&value), vec!["first", "leap"]);

    let days = value["data"]["days"].as_array().expect("days");
    assert_eq!(days.len(), 42);
    assert_eq!(days[0]["date"], "2024-01-28");
    assert_eq!(days[0]["inMonth"], false);
    assert_eq!(days[4]["date"], "2024-02-01");
    assert_eq!(days[4]["inMonth"], true);
}

#[test]
fn range_is_inclusive_and_inverted_is_empty() {
    let root = TestRoot::new();
    root.new_task("a", "2024-01-31", "09:00", "10:00");
    root.new_task("b", "2024-02-01", "09:00", "10:00");
    root.new_task("c", "2024-02-02", "09:00", "10:00");

    let value = root.json(&["range", "2024-01-31", "2024-02-01"]);
    assert_eq!(titles(&value), vec!["a", "b"]);

    let inverted = root.json(&["range", "2024-02-02", "2024-01-31"]);
    assert!(titles(&inverted).is_empty());
}

#[test]
fn filters_narrow_query_results() {
    let root = TestRoot::new();
    let report = root.new_task("Quarterly report", "2024-03-04", "09:00", "11:00");
    root.new_task("Run", "2024-03-05", "07:00", "08:00");
    root.json(&["edit", &report, "--type", "work"]);
    root.json(&["status", &report, "completed"]);

    let by_search = root.json(&["month", "--year", "2024", "--month", "3", "--search", " REPORT "]);
    assert_eq!(titles(&by_search), vec!["Quarterly report"]);
    assert_eq!(by_search["data"]["matched"], 2);

    let by_status = root.json(&[
        "month", "--year", "2024", "--month", "3", "--status", "pending", "--type", "all",
    ]);
    assert_eq!(titles(&by_status), vec!["Run"]);

    let combined = root.json(&[
        "month", "--year", "2024", "--month", "3", "--status", "completed", "--type", "health",
    ]);
    assert!(titles(&combined).is_empty());
}

#[test]
fn edit_and_status_update_fields() {
    let root = TestRoot::new();
    let id = root.new_task("Read", "2024-03-01", "20:00", "21:00");

    let edited = root.json(&["edit", &id, "--date", "2024-03-02", "--title", "Read book"]);
    assert_eq!(edited["data"]["date"], "2024-03-02");
    assert_eq!(edited["data"]["title"], "Read book");
    assert_eq!(edited["data"]["startTime"], "20:00");

    let status = root.json(&["status", &id, "inprogress"]);
    assert_eq!(status["data"]["status"], "inprogress");
    assert_eq!(status["data"]["title"], "Read book");
}

#[test]
fn delete_removes_task_and_second_delete_is_not_found() {
    let root = TestRoot::new();
    let id = root.new_task("Call", "2024-03-01", "18:00", "18:30");

    let value = root.json(&["delete", &id]);
    assert_eq!(value["data"]["id"], id.as_str());
    assert_eq!(value["data"]["message"], "Task deleted");

    root.cmd()
        .args(["delete", &id])
        .assert()
        .code(3)
        .stderr(contains("Task not found"));
}

#[test]
fn stats_counts_month_by_status() {
    let root = TestRoot::new();
    let done = root.new_task("done", "2024-03-01", "09:00", "10:00");
    root.new_task("open", "2024-03-02", "09:00", "10:00");
    root.new_task("other month", "2024-04-01", "09:00", "10:00");
    root.json(&["status", &done, "completed"]);

    let value = root.json(&["stats", "--year", "2024", "--month", "3"]);
    let counts = &value["data"]["counts"];
    assert_eq!(counts["total"], 2);
    assert_eq!(counts["completed"], 1);
    assert_eq!(counts["pending"], 1);
    assert_eq!(counts["overdue"], 0);
}

#[test]
fn invalid_input_exits_with_user_error() {
    let root = TestRoot::new();

    let output = root
        .cmd()
        .args(["--json", "new", "Bad", "--date", "2024-02-30", "--start", "09:00", "--end", "10:00"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("error json");
    assert_eq!(value["status"], "error");
    assert_eq!(value["command"], "new");
    assert_eq!(value["error"]["kind"], "invalid_input");

    root.cmd()
        .args(["new", "Bad", "--date", "2024-03-01", "--start", "9am", "--end", "10:00"])
        .assert()
        .code(2);
    root.cmd().args(["month", "--month", "13"]).assert().code(2);
    root.cmd().args(["day", "--status", "done"]).assert().code(2);
    assert!(root.read_tasks().expect("tasks").is_empty());
}

#[test]
fn unknown_show_id_is_not_found() {
    let root = TestRoot::new();
    root.cmd().args(["show", "01hzzzzzzz"]).assert().code(3);
}

#[test]
fn corrupt_collection_is_store_unavailable() {
    let root = TestRoot::new();
    root.write_file(".daybook/tasks.jsonl", "{broken\n").expect("write");

    root.cmd()
        .args(["day", "--date", "2024-03-01"])
        .assert()
        .code(4)
        .stderr(contains("Task store unavailable"));
}

#[test]
fn config_supplies_defaults_for_new_tasks() {
    let root = TestRoot::new();
    root.write_config(
        r#"
[tasks]
default_status = "inprogress"
default_type = "study"
"#,
    )
    .expect("config");

    let id = root.new_task("Flashcards", "2024-03-01", "08:00", "08:30");
    let shown = root.json(&["show", &id]);
    assert_eq!(shown["data"]["status"], "inprogress");
    assert_eq!(shown["data"]["type"], "study");
}

#[test]
fn invalid_config_is_rejected() {
    let root = TestRoot::new();
    root.write_config("[tasks]\ndefault_status = \"someday\"\n")
        .expect("config");

    root.cmd()
        .args(["day", "--date", "2024-03-01"])
        .assert()
        .code(2)
        .stderr(contains("Invalid configuration"));
}

#[test]
fn init_rejects_malformed_config_as_user_error() {
    let root = TestRoot::new();
    root.write_config("data_dir = [").expect("config");

    let output = root
        .cmd()
        .args(["--json", "init"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("error json");
    assert_eq!(value["command"], "init");
    assert_eq!(value["error"]["kind"], "invalid_config");
    assert!(!root.tasks_file().exists());
}

#[test]
fn malformed_config_blocks_queries_with_user_error() {
    let root = TestRoot::new();
    root.write_config("[tasks\n").expect("config");

    root.cmd()
        .args(["day", "--date", "2024-03-01"])
        .assert()
        .code(2)
        .stderr(contains("Invalid configuration"));
}

#[test]
fn overnight_slot_is_stored_with_a_warning() {
    let root = TestRoot::new();
    let created = root.json(&[
        "new", "Night shift", "--date", "2024-03-01", "--start", "22:00", "--end", "06:00",
    ]);
    assert_eq!(created["data"]["endTime"], "06:00");
    let warning = created["warnings"][0].as_str().expect("warning");
    assert!(warning.contains("earlier than startTime 22:00"));

    let id = created["data"]["id"].as_str().expect("id");
    let fixed = root.json(&["edit", id, "--end", "23:30"]);
    assert!(fixed.get("warnings").is_none());

    root.cmd()
        .args(["new", "Late", "--date", "2024-03-02", "--start", "23:00", "--end", "01:00"])
        .assert()
        .success()
        .stdout(contains("Warnings:"));
}

#[test]
fn inverted_range_warns_that_nothing_matches() {
    let root = TestRoot::new();
    root.new_task("a", "2024-02-01", "09:00", "10:00");

    let inverted = root.json(&["range", "2024-02-02", "2024-01-31"]);
    assert!(titles(&inverted).is_empty());
    let warning = inverted["warnings"][0].as_str().expect("warning");
    assert!(warning.contains("after end 2024-01-31"));

    let ordered = root.json(&["range", "2024-01-31", "2024-02-02"]);
    assert!(ordered.get("warnings").is_none());
}

#[test]
fn day_with_impossible_date_is_empty() {
    let root = TestRoot::new();
    root.new_task("a", "2024-02-29", "09:00", "10:00");

    let value = root.json(&["day", "--date", "2024-02-30"]);
    assert!(titles(&value).is_empty());
    assert_eq!(value["data"]["window"]["start"], "2024-02-30");

    root.cmd()
        .args(["--json", "day", "--date", "2024-2-30"])
        .assert()
        .code(2);
}

#[test]
fn root_can_come_from_environment() {
    let root = TestRoot::new();
    let id = root.new_task("Env", "2024-03-01", "09:00", "10:00");

    support::daybook_cmd()
        .env("DAYBOOK_ROOT", root.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Env"));
}
