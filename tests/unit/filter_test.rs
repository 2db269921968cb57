//! Tests for target and people filters

use sereto::SeretoError;
use sereto::config::{OneOrMany, PersonFilter};
use sereto::models::PersonType;

use crate::common::TestProject;

// =============================================================================
// TARGETS
// =============================================================================

#[test]
fn test_filter_targets_without_criteria_returns_all() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    assert_eq!(cfg.filter_targets(None, None, false).unwrap().len(), 3);
    assert!(cfg.filter_targets(None, None, true).unwrap().is_empty());
}

#[test]
fn test_filter_targets_by_category_keeps_order() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let names: Vec<&str> = cfg
        .filter_targets(Some("dast".into()), None, false)
        .unwrap()
        .iter()
        .map(|t| t.name.as_str())
        .collect();

    assert_eq!(names, vec!["Customer Portal", "Admin Console"]);
}

#[test]
fn test_filter_targets_by_several_categories() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let categories: &[&str] = &["sast", "mobile"];
    let targets = cfg.filter_targets(Some(categories.into()), None, false).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].name, "Portal Backend");
}

#[test]
fn test_filter_targets_name_is_unanchored_regex() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let targets = cfg.filter_targets(None, Some("Portal"), false).unwrap();
    assert_eq!(targets.len(), 2);

    let targets = cfg.filter_targets(Some("dast".into()), Some("^Portal"), true).unwrap();
    assert_eq!(targets.len(), 3);
}

#[test]
fn test_filter_targets_invalid_regex() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let err = cfg.filter_targets(None, Some("(unclosed"), false).unwrap_err();
    assert!(matches!(err, SeretoError::Parse { kind: "pattern", .. }));
}

// =============================================================================
// PEOPLE
// =============================================================================

#[test]
fn test_filter_people_by_type() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let criteria = PersonFilter {
        kind: Some(OneOrMany::parse(&["author", "reviewer"]).unwrap()),
        ..PersonFilter::default()
    };
    let people = cfg.filter_people(&criteria, false).unwrap();

    let names: Vec<Option<&str>> = people.iter().map(|p| p.name.as_deref()).collect();
    assert_eq!(names, vec![Some("Bob Smith"), Some("Carol White")]);
}

#[test]
fn test_filter_people_unset_field_never_matches() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let criteria = PersonFilter {
        email: Some("."),
        ..PersonFilter::default()
    };

    let matched = cfg.filter_people(&criteria, false).unwrap();
    assert_eq!(matched.len(), 2);

    let unmatched = cfg.filter_people(&criteria, true).unwrap();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].kind, PersonType::Reviewer);
}

#[test]
fn test_filter_people_combines_criteria() {
    let project = TestProject::new();
    let config = project.load();
    let cfg = config.last_config().unwrap();

    let criteria = PersonFilter {
        kind: Some(PersonType::Requester.into()),
        business_unit: Some("Digital"),
        email: Some("@example\\.com$"),
        ..PersonFilter::default()
    };
    let people = cfg.filter_people(&criteria, false).unwrap();

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name.as_deref(), Some("Alice Novak"));
}

#[test]
fn test_filter_people_unknown_type() {
    let err = OneOrMany::<PersonType>::parse(&["ceo"]).unwrap_err();
    assert!(matches!(err, SeretoError::Parse { kind: "person type", .. }));
}
