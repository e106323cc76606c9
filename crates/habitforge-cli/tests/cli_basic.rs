//! Basic CLI E2E tests.
//!
//! Tests invoke the CLI binary against a temporary data directory and
//! verify its JSON output.

mod common;

use common::{assert_contains, parse_json, run_cli_failure, run_cli_success};
use serde_json::Value;
use tempfile::TempDir;

fn create(dir: &TempDir, name: &str, category: &str) -> String {
    let out = run_cli_success(dir.path(), &["habit", "create", name, "--category", category]);
    let habit: Value = parse_json(&out);
    habit["id"].as_str().unwrap().to_string()
}

#[test]
fn test_habit_create_and_list() {
    let dir = TempDir::new().unwrap();
    create(&dir, "Run", "health");
    create(&dir, "Read", "learning");

    let all: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["habit", "list"]));
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["name"], "Run");
    assert_eq!(all[0]["streak"], 0);

    let learning: Vec<Value> = parse_json(&run_cli_success(
        dir.path(),
        &["habit", "list", "--category", "learning"],
    ));
    assert_eq!(learning.len(), 1);
    assert_eq!(learning[0]["name"], "Read");
}

#[test]
fn test_habit_create_empty_name_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["habit", "create", "  "]);
    assert_contains(&stderr, "name must not be empty");
    let all: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["habit", "list"]));
    assert!(all.is_empty());
}

#[test]
fn test_toggle_awards_and_removes_xp() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, "Meditate", "mindfulness");

    let (stdout, stderr, code) =
        common::run_cli(dir.path(), &["habit", "toggle", &id]);
    assert_eq!(code, 0);
    let report: Value = parse_json(&stdout);
    assert_eq!(report["completed"], true);
    assert_eq!(report["habitId"], id.as_str());
    assert_contains(&stderr, "HabitToggled");
    assert_contains(&stderr, "\"habitId\"");

    let progress: Value = parse_json(&run_cli_success(dir.path(), &["progress"]));
    assert_eq!(progress["xp"], 10);
    assert_eq!(progress["level"], 1);
    assert_eq!(progress["title"], "Pemula");

    let stats: Value = parse_json(&run_cli_success(dir.path(), &["stats"]));
    assert_eq!(stats["completedToday"], 1);
    assert_eq!(stats["habits"][0]["doneToday"], true);
    assert_eq!(stats["progress"]["xpNeeded"], 100);
    assert_eq!(stats["streak"], 1);

    let report: Value = parse_json(&run_cli_success(dir.path(), &["habit", "toggle", &id]));
    assert_eq!(report["completed"], false);
    let progress: Value = parse_json(&run_cli_success(dir.path(), &["progress"]));
    assert_eq!(progress["xp"], 0);
}

#[test]
fn test_toggle_with_explicit_date() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, "Journal", "mindfulness");
    let report: Value = parse_json(&run_cli_success(
        dir.path(),
        &["habit", "toggle", &id, "--date", "2020-01-01"],
    ));
    assert_eq!(report["date"], "2020-01-01");

    let habit: Value = parse_json(&run_cli_success(dir.path(), &["habit", "get", &id]));
    assert_eq!(habit["completedDates"][0], "2020-01-01");

    let (_, stderr, _) =
        run_cli_failure(dir.path(), &["habit", "toggle", &id, "--date", "01/01/2020"]);
    assert_contains(&stderr, "Invalid date");
}

#[test]
fn test_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, "Run", "health");

    run_cli_failure(dir.path(), &["habit", "delete", &id]);
    let all: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["habit", "list"]));
    assert_eq!(all.len(), 1);

    let out = run_cli_success(dir.path(), &["habit", "delete", &id, "--yes"]);
    assert_contains(&out, "Habit deleted");
    let all: Vec<Value> = parse_json(&run_cli_success(dir.path(), &["habit", "list"]));
    assert!(all.is_empty());
}

#[test]
fn test_delete_unknown_habit_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["habit", "delete", "ghost", "--yes"]);
    assert_contains(&stderr, "Habit not found: ghost");
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "progression.xp_per_habit"]);
    assert_eq!(out.trim(), "10");

    run_cli_success(dir.path(), &["config", "set", "progression.xp_per_habit", "50"]);
    let out = run_cli_success(dir.path(), &["config", "get", "progression.xp_per_habit"]);
    assert_eq!(out.trim(), "50");

    let id = create(&dir, "Run", "health");
    run_cli_success(dir.path(), &["habit", "toggle", &id]);
    let progress: Value = parse_json(&run_cli_success(dir.path(), &["progress"]));
    assert_eq!(progress["xp"], 50);

    run_cli_failure(dir.path(), &["config", "set", "progression.xp_per_level", "0"]);
    run_cli_failure(dir.path(), &["config", "get", "no.such.key"]);

    run_cli_success(dir.path(), &["config", "reset"]);
    let out = run_cli_success(dir.path(), &["config", "get", "progression.xp_per_habit"]);
    assert_eq!(out.trim(), "10");
}

#[test]
fn test_tip() {
    let dir = TempDir::new().unwrap();
    let tip: Value = parse_json(&run_cli_success(dir.path(), &["tip", "--today"]));
    assert!(tip["title"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(tip.get("content").is_some());
}

#[test]
fn test_tip_quote() {
    let dir = TempDir::new().unwrap();
    let out: Value = parse_json(&run_cli_success(dir.path(), &["tip", "--quote"]));
    assert!(out["quote"].as_str().is_some_and(|q| !q.is_empty()));

    let first: Value = parse_json(&run_cli_success(dir.path(), &["tip", "--quote", "--today"]));
    let again: Value = parse_json(&run_cli_success(dir.path(), &["tip", "--quote", "--today"]));
    assert_eq!(first, again);
}

#[test]
fn test_category_outside_presets_is_noted() {
    let dir = TempDir::new().unwrap();
    let presets: Vec<String> = parse_json(&run_cli_success(dir.path(), &["habit", "categories"]));
    assert_eq!(presets, vec!["health", "productivity", "mindfulness", "learning"]);

    let (stdout, stderr, code) = common::run_cli(
        dir.path(),
        &["habit", "create", "Piano", "--category", "music"],
    );
    assert_eq!(code, 0);
    assert_contains(&stderr, "'music' is not in habits.categories");
    let habit: Value = parse_json(&stdout);
    assert_eq!(habit["category"], "music");

    run_cli_success(dir.path(), &["config", "set", "habits.categories", "health, music"]);
    let (_, stderr, code) = common::run_cli(
        dir.path(),
        &["habit", "create", "Guitar", "--category", "music"],
    );
    assert_eq!(code, 0);
    assert!(!stderr.contains("not in habits.categories"));
}

#[test]
fn test_oversized_xp_setting_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(
        dir.path(),
        &["config", "set", "progression.xp_per_habit", "1000000000000000000"],
    );
    assert_contains(&stderr, "must be between 1 and");
    let out = run_cli_success(dir.path(), &["config", "get", "progression.xp_per_habit"]);
    assert_eq!(out.trim(), "10");
}
