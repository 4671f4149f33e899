use super::*;
use sw_core::MemoryResourceSpace;

/// Records statements; fails any statement containing `FAIL`
#[derive(Default)]
struct RecordingConnection {
    executed: Vec<String>,
}

impl SqlConnection for RecordingConnection {
    fn execute_statement(&mut self, sql: &str) -> DbResult<()> {
        if sql.contains("FAIL") {
            return Err(DbError::ExecutionError(format!("rejected: {}", sql)));
        }
        self.executed.push(sql.to_string());
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

fn script(location: &str) -> ScriptReference {
    ScriptReference::new(location, location)
}

fn run(
    space: &MemoryResourceSpace,
    settings: RunnerSettings,
    scripts: &[&str],
) -> (DbResult<()>, Vec<String>) {
    let mut populator = ScriptPopulator::new(space);
    ScriptRunner::<RecordingConnection>::configure(&mut populator, settings);
    for s in scripts {
        ScriptRunner::<RecordingConnection>::add_script(&mut populator, script(s));
    }
    let mut conn = RecordingConnection::default();
    let result = populator.populate(&mut conn);
    (result, conn.executed)
}

#[test]
fn test_scripts_run_in_order_added() {
    let space = MemoryResourceSpace::new()
        .with_file("b.sql", "SELECT 'b1'; SELECT 'b2';")
        .with_file("a.sql", "SELECT 'a1';");
    let (result, executed) = run(&space, RunnerSettings::default(), &["b.sql", "a.sql"]);
    result.unwrap();
    assert_eq!(executed, vec!["SELECT 'b1'", "SELECT 'b2'", "SELECT 'a1'"]);
}

#[test]
fn test_abort_on_first_error() {
    let space = MemoryResourceSpace::new()
        .with_file("a.sql", "SELECT 1; SELECT FAIL; SELECT 2;")
        .with_file("b.sql", "SELECT 3;");
    let (result, executed) = run(&space, RunnerSettings::default(), &["a.sql", "b.sql"]);
    match result.unwrap_err() {
        DbError::ScriptExecution {
            script, statement, ..
        } => {
            assert_eq!(script, "a.sql");
            assert_eq!(statement, "SELECT FAIL");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(executed, vec!["SELECT 1"]);
}

#[test]
fn test_continue_on_error() {
    let space = MemoryResourceSpace::new().with_file("a.sql", "SELECT 1; SELECT FAIL; SELECT 2;");
    let settings = RunnerSettings {
        continue_on_error: true,
        ..RunnerSettings::default()
    };
    let (result, executed) = run(&space, settings, &["a.sql"]);
    result.unwrap();
    assert_eq!(executed, vec!["SELECT 1", "SELECT 2"]);
}

#[test]
fn test_missing_script_is_read_error() {
    let space = MemoryResourceSpace::new();
    let (result, _) = run(&space, RunnerSettings::default(), &["gone.sql"]);
    assert!(matches!(result.unwrap_err(), DbError::ScriptRead { .. }));
}

#[test]
fn test_invalid_utf8_rejected() {
    let space = MemoryResourceSpace::new().with_file("a.sql", vec![b'S', 0xff, b';']);
    let (result, _) = run(&space, RunnerSettings::default(), &["a.sql"]);
    let err = result.unwrap_err();
    assert!(matches!(err, DbError::ScriptEncoding { .. }));
    assert!(err.to_string().contains("UTF-8"));
}

#[test]
fn test_latin1_decoding() {
    let space = MemoryResourceSpace::new()
        .with_file("a.sql", vec![b'S', b'E', b'L', b' ', b'\'', 0xe9, b'\'']);
    let settings = RunnerSettings {
        encoding: ScriptEncoding::Latin1,
        ..RunnerSettings::default()
    };
    let (result, executed) = run(&space, settings, &["a.sql"]);
    result.unwrap();
    assert_eq!(executed, vec!["SEL 'é'"]);
}

#[test]
fn test_bom_stripped() {
    let space = MemoryResourceSpace::new().with_file("a.sql", "\u{feff}SELECT 1;");
    let (result, executed) = run(&space, RunnerSettings::default(), &["a.sql"]);
    result.unwrap();
    assert_eq!(executed, vec!["SELECT 1"]);
}

#[test]
fn test_default_settings_are_strict_utf8() {
    let settings = RunnerSettings::default();
    assert!(!settings.continue_on_error);
    assert_eq!(settings.encoding, ScriptEncoding::Utf8);
}
