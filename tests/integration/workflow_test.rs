//! Integration tests for editing a project through the CLI
//!
//! Tests the complete flow:
//! 1. Create a project
//! 2. Add targets, dates and people
//! 3. Filter and select them
//! 4. Start a retest and inspect both versions

use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;

use super::{new_project, sereto};

/// Run a command inside the project and assert success
fn run_ok(home: &Path, project: &Path, args: &[&str]) -> String {
    let output = sereto(home).args(args).arg("--project").arg(project).output().unwrap();
    assert!(
        output.status.success(),
        "sereto {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Project with two dast targets and one sast target
fn project_with_targets(temp: &TempDir) -> PathBuf {
    let project = new_project(temp);
    let home = temp.path();
    run_ok(home, &project, &["config", "targets", "add", "dast", "Customer Portal", "-f", "url=https://portal.example.com"]);
    run_ok(home, &project, &["config", "targets", "add", "sast", "Portal Backend"]);
    run_ok(home, &project, &["config", "targets", "add", "dast", "Admin Console"]);
    project
}

#[test]
fn test_add_and_show_targets() {
    let temp = TempDir::new().unwrap();
    let project = project_with_targets(&temp);

    let stdout = run_ok(temp.path(), &project, &["config", "targets", "show", "--json", "-c", "dast"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let items = json["versions"][0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["uname"], "target_dast_customer_portal");
    assert_eq!(items[1]["index"], 3);

    let content = std::fs::read_to_string(project.join("config.json")).unwrap();
    assert!(content.contains("\"url\": \"https://portal.example.com\""));
}

#[test]
fn test_show_targets_inverse() {
    let temp = TempDir::new().unwrap();
    let project = project_with_targets(&temp);

    let stdout = run_ok(temp.path(), &project, &["config", "targets", "show", "-c", "dast", "--inverse"]);
    assert!(stdout.contains("Portal Backend"));
    assert!(!stdout.contains("Admin Console"));
}

#[test]
fn test_add_duplicate_target_fails() {
    let temp = TempDir::new().unwrap();
    let project = project_with_targets(&temp);

    sereto(temp.path())
        .args(["config", "targets", "add", "dast", "customer-portal", "--project"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("target_dast_customer_portal"));
}

#[test]
fn test_select_target() {
    let temp = TempDir::new().unwrap();
    let project = project_with_targets(&temp);

    let stdout = run_ok(temp.path(), &project, &["config", "targets", "select", "sast"]);
    assert!(stdout.contains("target_sast_portal_backend"));

    let stdout = run_ok(temp.path(), &project, &["config", "targets", "select", "3", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["name"], "Admin Console");
    assert_eq!(json["risks"]["critical"], 0);

    sereto(temp.path())
        .args(["config", "targets", "select", "dast", "--project"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("use uname"));

    sereto(temp.path())
        .args(["config", "targets", "select", "--project"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 targets present"));
}

#[test]
fn test_delete_target() {
    let temp = TempDir::new().unwrap();
    let project = project_with_targets(&temp);

    let stdout = run_ok(temp.path(), &project, &["config", "targets", "delete", "-i", "1"]);
    assert!(stdout.contains("target_dast_customer_portal"));

    let stdout = run_ok(temp.path(), &project, &["config", "targets", "show"]);
    assert!(!stdout.contains("Customer Portal"));

    sereto(temp.path())
        .args(["config", "targets", "delete", "-i", "7", "--project"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_dates_workflow() {
    let temp = TempDir::new().unwrap();
    let project = new_project(&temp);
    let home = temp.path();

    run_ok(home, &project, &["config", "dates", "add", "sow_sent", "2024-01-02"]);
    run_ok(home, &project, &["config", "dates", "add", "meeting", "2024-01-05", "--until", "2024-01-10"]);
    run_ok(home, &project, &["config", "dates", "add", "meeting", "2024-01-20", "--until", "2024-02-05"]);

    let stdout = run_ok(
        home,
        &project,
        &["config", "dates", "show", "-t", "meeting", "--start", "2024-01-01", "--end", "2024-01-31"],
    );
    assert!(stdout.contains("05-Jan-2024 - 10-Jan-2024"));
    assert!(!stdout.contains("20-Jan-2024"));

    sereto(home)
        .args(["config", "dates", "add", "review", "2024-01-10", "--until", "2024-01-05", "--project"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be before"));

    run_ok(home, &project, &["config", "dates", "delete", "-i", "1"]);
    let stdout = run_ok(home, &project, &["config", "dates", "show"]);
    assert!(!stdout.contains("sow_sent"));
}

#[test]
fn test_people_workflow() {
    let temp = TempDir::new().unwrap();
    let project = new_project(&temp);
    let home = temp.path();

    run_ok(home, &project, &["config", "people", "add", "requester", "-n", "Alice Novak", "-b", "Digital"]);
    run_ok(home, &project, &["config", "people", "add", "author", "-n", "Bob Smith", "-e", "bob@example.com"]);

    let stdout = run_ok(home, &project, &["config", "people", "show", "--json", "-e", "example"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = json["versions"][0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Bob Smith");
    assert_eq!(items[0]["index"], 2);

    sereto(home)
        .args(["config", "people", "add", "ceo", "--project"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid person type"));
}

#[test]
fn test_retest_workflow() {
    let temp = TempDir::new().unwrap();
    let project = project_with_targets(&temp);
    let home = temp.path();

    let stdout = run_ok(home, &project, &["retest"]);
    assert!(stdout.contains("v2.0"));

    let stdout = run_ok(home, &project, &["config", "versions"]);
    assert!(stdout.contains("v1.0 - Customer Portal Assessment (Initial)"));
    assert!(stdout.contains("v2.0 - Customer Portal Assessment (Retest)"));

    run_ok(home, &project, &["config", "targets", "delete", "-i", "2", "--at", "v1.0"]);

    let stdout = run_ok(home, &project, &["config", "targets", "show", "--all", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["versions"][0]["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["versions"][1]["items"].as_array().unwrap().len(), 3);
}
