//! Tests for document validation on load

use sereto::SeretoError;
use sereto::models::ConfigModel;

use crate::common::{SAMPLE_CONFIG, TestProject, sample_with};

/// Load a document and return the path of its validation error
fn rejected_at(content: &str) -> String {
    match ConfigModel::from_slice(content.as_bytes()) {
        Err(SeretoError::Validation { path, .. }) => path,
        Err(other) => panic!("expected a validation error, got {other}"),
        Ok(_) => panic!("document should be rejected"),
    }
}

#[test]
fn test_sample_is_valid() {
    assert!(ConfigModel::from_slice(SAMPLE_CONFIG.as_bytes()).is_ok());
}

#[test]
fn test_malformed_json() {
    assert_eq!(rejected_at("{ not json"), "");
}

#[test]
fn test_missing_required_field() {
    let content = sample_with("\"id\": \"PT01234\",", "");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0");
}

#[test]
fn test_invalid_project_id() {
    let content = sample_with("\"PT01234\"", "\"PT 01234\"");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0/id");
}

#[test]
fn test_unknown_person_type() {
    let content = sample_with("\"requester\"", "\"ceo\"");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0/people/0/type");
}

#[test]
fn test_unknown_date_type() {
    let content = sample_with("\"sow_sent\"", "\"kickoff\"");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0/dates/0/type");
}

#[test]
fn test_invalid_version_key() {
    let content = sample_with("\"v1.0\": {", "\"release-1\": {");
    assert!(rejected_at(&content).starts_with("/version_configs"));
}

#[test]
fn test_invalid_calendar_date() {
    let content = sample_with("\"02-Jan-2024\"", "\"31-Feb-2024\"");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0/dates/0/date");
}

#[test]
fn test_reversed_date_range() {
    let content = sample_with("\"end\": \"10-Jan-2024\"", "\"end\": \"01-Jan-2024\"");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0/dates/1/date");
}

#[test]
fn test_duplicate_target_uname() {
    let content = sample_with("\"Admin Console\"", "\"customer-portal\"");
    assert_eq!(rejected_at(&content), "/version_configs/v1.0/targets/2");
}

#[test]
fn test_colliding_version_keys() {
    let content = SAMPLE_CONFIG.replacen(
        "\"version_configs\": {",
        "\"version_configs\": {\n    \"1.0\": { \"id\": \"PT01\", \"name\": \"x\", \"version_description\": \"x\" },",
        1,
    );
    match ConfigModel::from_slice(content.as_bytes()) {
        Err(SeretoError::Validation { path, message }) => {
            assert!(path.starts_with("/version_configs/"));
            assert!(message.contains("duplicates"));
        },
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_unknown_top_level_field() {
    let content = sample_with("\"sereto_version\"", "\"extra\": 1,\n  \"sereto_version\"");
    assert_eq!(rejected_at(&content), "");
}

#[test]
fn test_validation_error_through_config_load() {
    let project = TestProject::empty();
    project.write_config(&sample_with("\"PT01234\"", "\"\""));

    let err = sereto::Config::load_from(&project.config_path()).unwrap_err();
    assert!(err.to_string().starts_with("invalid config at '/version_configs/v1.0/id'"));
}
