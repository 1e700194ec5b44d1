use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("mindsync-{nanos}-{file_name}"))
}

fn run(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mindsync"))
        .args(args)
        .env("MINDSYNC_STORE_PATH", store)
        .env("MINDSYNC_CONFIG_PATH", store.with_extension("config.json"))
        .env("MINDSYNC_TODAY", "2025-01-15")
        .output()
        .expect("failed to run mindsync")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn read_store(store: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(store).unwrap()).unwrap()
}

#[test]
fn task_add_done_and_delete_round() {
    let store = temp_path("cli-task.json");

    let added = stdout_json(&run(&store, &["task", "add", "  Buy milk ", "--json"]));
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["title"], "Buy milk");
    assert_eq!(added["completed"], false);

    let done = stdout_json(&run(&store, &["task", "done", &id, "--json"]));
    assert_eq!(done["completed"], true);
    assert!(done["completed_at"].is_string());

    let listed = stdout_json(&run(&store, &["task", "list", "--json"]));
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let deleted = run(&store, &["task", "delete", &id]);
    assert!(deleted.status.success());
    assert!(String::from_utf8_lossy(&deleted.stdout).contains("Deleted task: Buy milk"));

    let stored = read_store(&store);
    std::fs::remove_file(&store).ok();
    assert_eq!(stored["schema_version"], 1);
    assert!(stored["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn task_done_with_unknown_id_fails() {
    let store = temp_path("cli-task-missing.json");

    let output = run(&store, &["task", "done", "task-404"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - task not found"));
}

#[test]
fn habit_done_marks_today_and_counts_streak() {
    let store = temp_path("cli-habit.json");

    let added = stdout_json(&run(&store, &["habit", "add", "Read", "--json"]));
    let id = added["id"].as_str().unwrap().to_string();

    let done = stdout_json(&run(&store, &["habit", "done", &id, "--json"]));
    assert_eq!(done["completed_today"], true);
    assert_eq!(done["streak"], 1);

    let listed = run(&store, &["habit", "list"]);
    let stored = read_store(&store);
    std::fs::remove_file(&store).ok();

    assert!(String::from_utf8_lossy(&listed.stdout).contains("[x] Read streak 1"));
    assert_eq!(
        stored["habits"][0]["completion_dates"],
        serde_json::json!(["2025-01-15"])
    );
}

#[test]
fn wellness_list_is_stable_and_toggle_persists() {
    let store = temp_path("cli-wellness.json");

    let first = stdout_json(&run(&store, &["wellness", "list", "--json"]));
    let second = stdout_json(&run(&store, &["wellness", "list", "--json"]));
    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 6);
    assert_eq!(first[0]["id"], "wellness-20250115-0");

    let toggled = stdout_json(&run(
        &store,
        &["wellness", "done", "wellness-20250115-3", "--json"],
    ));
    assert_eq!(toggled["completed"], true);
    assert_eq!(toggled["title"], first[3]["title"]);

    let after = stdout_json(&run(&store, &["wellness", "list", "--json"]));
    let stored = read_store(&store);
    std::fs::remove_file(&store).ok();

    assert_eq!(after[3]["completed"], true);
    assert_eq!(stored["wellness_completions"][0]["date"], "2025-01-15");
    assert_eq!(stored["wellness_completions"][0]["title"], first[3]["title"]);
}

#[test]
fn mood_set_and_list() {
    let store = temp_path("cli-mood.json");

    let set = run(&store, &["mood", "set", "Calm"]);
    assert!(set.status.success());
    assert!(String::from_utf8_lossy(&set.stdout).contains("Recorded mood calm for 2025-01-15"));

    run(&store, &["mood", "set", "sad", "--date", "2025-01-10"]);
    let moods = stdout_json(&run(&store, &["mood", "list", "--json"]));
    std::fs::remove_file(&store).ok();

    assert_eq!(moods["2025-01-15"], "calm");
    assert_eq!(moods["2025-01-10"], "sad");
}

#[test]
fn mood_set_rejects_unknown_mood() {
    let store = temp_path("cli-mood-bad.json");

    let output = run(&store, &["mood", "set", "elated"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("ERROR: invalid_input"));
    assert!(!store.exists());
}

#[test]
fn export_writes_json_and_csv() {
    let store = temp_path("cli-export.json");
    run(&store, &["task", "add", "Call mum, then dad"]);

    let json = stdout_json(&run(&store, &["export"]));
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["tasks"][0]["title"], "Call mum, then dad");

    let csv = run(&store, &["export", "--format", "csv"]);
    std::fs::remove_file(&store).ok();

    assert!(csv.status.success());
    let text = String::from_utf8_lossy(&csv.stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Type,Title,Status,Created Date,Completed Date");
    assert!(lines[1].starts_with("Task,\"Call mum, then dad\",Pending,"));
    assert_eq!(lines.iter().filter(|line| line.starts_with("Wellness,")).count(), 6);
}

#[test]
fn csv_export_with_small_tip_pool_keeps_task_rows() {
    let store = temp_path("cli-export-small-pool.json");
    let tips = temp_path("cli-export-small-tips.json");
    std::fs::write(&tips, r#"{ "wellnessTips": [ { "tip": "walk" } ] }"#).unwrap();
    run(&store, &["task", "add", "Water plants"]);

    let override_arg = format!("tips_path={}", tips.display());
    let csv = run(
        &store,
        &["export", "--format", "csv", "--config-override", &override_arg],
    );
    std::fs::remove_file(&store).ok();
    std::fs::remove_file(&tips).ok();

    assert!(csv.status.success());
    let text = String::from_utf8_lossy(&csv.stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Task,Water plants,Pending,"));
}

#[test]
fn wellness_list_plain_reports_day_score() {
    let store = temp_path("cli-wellness-plain.json");

    let before = run(&store, &["wellness", "list"]);
    run(&store, &["wellness", "done", "wellness-20250115-0"]);
    let after = run(&store, &["wellness", "list"]);
    std::fs::remove_file(&store).ok();

    assert!(String::from_utf8_lossy(&before.stdout).contains("Wellness: 0%"));
    assert!(String::from_utf8_lossy(&after.stdout).contains("Wellness: 25%"));
}
