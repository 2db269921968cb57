//! Tests for adding and deleting targets, dates and people

use sereto::SeretoError;
use sereto::models::{Date, DateType, Person, PersonType, SeretoDate, TargetModel};
use sereto::target::Target;

use crate::common::TestProject;

#[test]
fn test_delete_first_of_three_targets() {
    let project = TestProject::new();
    let mut config = project.load();
    let cfg = config.last_config_mut().unwrap();

    cfg.delete_target(1).unwrap();

    let names: Vec<&str> = cfg.targets().iter().map(|t| t.data().name.as_str()).collect();
    assert_eq!(names, vec!["Portal Backend", "Admin Console"]);
}

#[test]
fn test_delete_out_of_range_leaves_lists_unchanged() {
    let project = TestProject::new();
    let mut config = project.load();
    let before = config.clone();
    let cfg = config.last_config_mut().unwrap();

    for index in [0, 4] {
        let err = cfg.delete_target(index).unwrap_err();
        assert!(matches!(err, SeretoError::IndexOutOfRange { len: 3, .. }));
    }
    assert!(cfg.delete_date(5).unwrap_err().is_range());
    assert!(cfg.delete_person(0).unwrap_err().is_range());

    assert_eq!(config, before);
}

#[test]
fn test_delete_last_date_and_person() {
    let project = TestProject::new();
    let mut config = project.load();
    let cfg = config.last_config_mut().unwrap();

    cfg.delete_date(4).unwrap().delete_person(3).unwrap();

    assert_eq!(cfg.dates().len(), 3);
    assert_eq!(cfg.dates().last().map(|d| d.kind), Some(DateType::Meeting));
    assert_eq!(cfg.people().len(), 2);
    assert_eq!(cfg.people().last().map(|p| p.kind), Some(PersonType::Author));
}

#[test]
fn test_add_target_appends() {
    let project = TestProject::new();
    let mut config = project.load();
    let cfg = config.last_config_mut().unwrap();

    let data = TargetModel::new("mobile", "Banking App").with_field("platform", "android");
    cfg.add_target(Target::in_project(data, project.path())).unwrap();

    let added = cfg.targets().last().unwrap();
    assert_eq!(added.uname(), "target_mobile_banking_app");
    assert_eq!(added.data().extra["platform"], "android");
}

#[test]
fn test_add_target_duplicate_uname() {
    let project = TestProject::new();
    let mut config = project.load();
    let cfg = config.last_config_mut().unwrap();

    let data = TargetModel::new("dast", "customer-portal");
    let err = cfg.add_target(Target::in_project(data, project.path())).unwrap_err();

    assert!(matches!(err, SeretoError::DuplicateTarget(ref uname) if uname == "target_dast_customer_portal"));
    assert_eq!(cfg.targets().len(), 3);
}

#[test]
fn test_add_target_invalid_category() {
    let project = TestProject::new();
    let mut config = project.load();
    let cfg = config.last_config_mut().unwrap();

    let data = TargetModel::new("web app", "Shop");
    let err = cfg.add_target(Target::in_project(data, project.path())).unwrap_err();

    assert!(matches!(err, SeretoError::Parse { kind: "target category", .. }));
    assert_eq!(cfg.targets().len(), 3);
}

#[test]
fn test_add_date_and_person_chain() {
    let project = TestProject::new();
    let mut config = project.load();
    let cfg = config.last_config_mut().unwrap();

    cfg.add_date(Date::new(DateType::Review, SeretoDate::from_ymd(2024, 2, 8).unwrap()))
        .add_person(Person::new(PersonType::TechnicalContact).with_email("ops@example.com"));

    assert_eq!(cfg.dates().last().map(|d| d.kind), Some(DateType::Review));
    let person = cfg.people().last().unwrap();
    assert_eq!(person.kind, PersonType::TechnicalContact);
    assert_eq!(person.email.as_deref(), Some("ops@example.com"));
    assert!(person.name.is_none());
}

#[test]
fn test_template_vars() {
    let project = TestProject::new();
    let config = project.load();
    let vars = config.last_config().unwrap().template_vars();

    assert_eq!(vars["version"], "v1.0");
    assert_eq!(vars["id"], "PT01234");
    assert_eq!(vars["targets"][0]["url"], "https://portal.example.com");
    assert_eq!(vars["dates"][1]["date"]["start"], "05-Jan-2024");
    assert_eq!(vars["people"][2]["type"], "reviewer");
    assert!(vars["people"][2].get("email").is_none());
}
