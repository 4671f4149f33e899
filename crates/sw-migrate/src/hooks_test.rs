use super::*;
use crate::test_utils::{RecordingConnection, RecordingRunner, RunnerEvent, RunnerLog};
use std::cell::RefCell;
use sw_core::ScriptReference;

fn script(location: &str) -> ScriptReference {
    ScriptReference::new(location, location)
}

fn all_groups() -> ScriptGroups {
    ScriptGroups {
        default: vec![script("db/init.sql"), script("db/init-mysql.sql")],
        default_data: vec![script("db/init-data.sql")],
        baseline: vec![script("db/V2.sql")],
        baseline_data: vec![script("db/V2-data.sql")],
    }
}

fn injector(
    groups: ScriptGroups,
    only_patches: bool,
) -> (ScriptInjector<RecordingConnection>, RunnerLog) {
    let events: RunnerLog = Rc::new(RefCell::new(Vec::new()));
    let injector = ScriptInjector::new(
        Rc::new(groups),
        only_patches,
        RecordingRunner::factory(Rc::clone(&events)),
    );
    (injector, events)
}

#[test]
fn test_before_baseline_runs_groups_in_order() {
    let (mut injector, events) = injector(all_groups(), false);
    let mut conn = RecordingConnection::default();
    injector.before_baseline(&mut conn).unwrap();

    assert_eq!(
        RecordingRunner::added(&events),
        vec!["db/init.sql", "db/init-mysql.sql", "db/V2.sql", "db/V2-data.sql"]
    );
    // One configured runner per non-empty group
    let populates = events
        .borrow()
        .iter()
        .filter(|e| **e == RunnerEvent::Populate)
        .count();
    assert_eq!(populates, 3);
    assert!(injector.baselined_flag().get());
}

#[test]
fn test_runner_configured_to_abort_on_error() {
    let (mut injector, events) = injector(all_groups(), false);
    injector
        .before_baseline(&mut RecordingConnection::default())
        .unwrap();
    assert_eq!(
        events.borrow()[0],
        RunnerEvent::Configure(RunnerSettings {
            continue_on_error: false,
            encoding: ScriptEncoding::Utf8,
        })
    );
}

#[test]
fn test_only_patches_runs_nothing() {
    let (mut injector, events) = injector(all_groups(), true);
    let mut conn = RecordingConnection::default();
    injector.before_baseline(&mut conn).unwrap();
    injector.after_migrate(&mut conn).unwrap();

    assert!(events.borrow().is_empty());
    assert!(injector.baselined_flag().get());
}

#[test]
fn test_no_scripts_is_not_an_error() {
    let (mut injector, events) = injector(ScriptGroups::default(), false);
    let mut conn = RecordingConnection::default();
    injector.before_baseline(&mut conn).unwrap();
    injector.after_migrate(&mut conn).unwrap();
    assert!(events.borrow().is_empty());
}

#[test]
fn test_empty_groups_are_skipped() {
    let groups = ScriptGroups {
        baseline: vec![script("db/V3.sql")],
        ..ScriptGroups::default()
    };
    let (mut injector, events) = injector(groups, false);
    injector
        .before_baseline(&mut RecordingConnection::default())
        .unwrap();
    assert_eq!(
        *events.borrow(),
        vec![
            RunnerEvent::Configure(RunnerSettings::default()),
            RunnerEvent::Add("db/V3.sql".to_string()),
            RunnerEvent::Populate,
        ]
    );
}

#[test]
fn test_after_migrate_without_baseline_does_nothing() {
    let (mut injector, events) = injector(all_groups(), false);
    injector
        .after_migrate(&mut RecordingConnection::default())
        .unwrap();
    assert!(events.borrow().is_empty());
}

#[test]
fn test_after_migrate_runs_default_data_after_baseline() {
    let (mut injector, events) = injector(all_groups(), false);
    let mut conn = RecordingConnection::default();
    injector.before_baseline(&mut conn).unwrap();
    events.borrow_mut().clear();

    injector.after_migrate(&mut conn).unwrap();
    assert_eq!(RecordingRunner::added(&events), vec!["db/init-data.sql"]);
}

#[test]
fn test_runner_error_propagates() {
    let events: RunnerLog = Rc::new(RefCell::new(Vec::new()));
    let mut injector = ScriptInjector::new(
        Rc::new(all_groups()),
        false,
        RecordingRunner::failing_factory(Rc::clone(&events)),
    );
    let err = injector
        .before_baseline(&mut RecordingConnection::default())
        .unwrap_err();
    assert!(matches!(err, sw_db::DbError::ExecutionError(_)));
    // The first failing group stops the rest
    assert_eq!(
        RecordingRunner::added(&events),
        vec!["db/init.sql", "db/init-mysql.sql"]
    );
}
