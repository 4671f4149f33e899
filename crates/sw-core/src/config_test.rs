use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert!(!config.enabled);
    assert!(config.only_patches);
    assert!(!config.repair_on_migrate);
    assert_eq!(config.database_name, "kaola");
    assert_eq!(config.baseline, None);
    assert_eq!(config.script_location, "db/migration");
    assert_eq!(config.script_prefix, "V");
    assert_eq!(config.platform, "all");
    assert_eq!(config.baseline_description, "(BASELINE)");
    assert_eq!(config.resource_roots, vec!["."]);
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.baseline_directive().unwrap(), BaselineDirective::Unset);
}

#[test]
fn test_default_matches_empty_yaml() {
    let parsed: Config = serde_yaml::from_str("{}").unwrap();
    let default = Config::default();
    assert_eq!(parsed.enabled, default.enabled);
    assert_eq!(parsed.only_patches, default.only_patches);
    assert_eq!(parsed.database_name, default.database_name);
    assert_eq!(parsed.script_layout(), default.script_layout());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
enabled: true
only_patches: false
database_name: orders
repair_on_migrate: true
baseline: auto
default_baseline_version: "0.9"
script_location: sql
script_prefix: R
default_script: init
platform: mysql
resource_roots:
  - resources
  - vendor/resources
database:
  path: ./dev.duckdb
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert!(config.enabled);
    assert!(!config.only_patches);
    assert!(config.repair_on_migrate);
    assert_eq!(config.database_name, "orders");
    assert_eq!(config.baseline_directive().unwrap(), BaselineDirective::Auto);
    assert_eq!(config.default_baseline().unwrap().as_str(), "0.9");
    assert_eq!(
        config.script_layout(),
        ScriptLayout {
            location: "sql".to_string(),
            prefix: "R".to_string(),
            platform: "mysql".to_string(),
            default_script: Some("init".to_string()),
        }
    );
    let root = PathBuf::from("/srv/app");
    assert_eq!(
        config.resource_roots_absolute(&root),
        vec![root.join("resources"), root.join("vendor/resources")]
    );
    assert_eq!(config.database.path, "./dev.duckdb");
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("enable: true");
    assert!(result.is_err());
}

#[test]
fn test_load_from_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("seedway.yml"), "enabled: true\nbaseline: \"2.1\"\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert!(config.enabled);
    assert_eq!(
        config.baseline_directive().unwrap(),
        BaselineDirective::Explicit(Version::parse("2.1").unwrap())
    );
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("seedway.yaml"), "database_name: x\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.database_name, "x");
}

#[test]
fn test_load_missing() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seedway.yml");
    std::fs::write(&path, "enabled: [").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigParseError { .. }
    ));
}

#[test]
fn test_validate_rejects_bad_baseline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seedway.yml");
    std::fs::write(&path, "baseline: newest\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::InvalidVersion { .. }
    ));
}

#[test]
fn test_validate_rejects_bad_default_baseline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seedway.yml");
    std::fs::write(&path, "default_baseline_version: one\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::InvalidVersion { .. }
    ));
}

#[test]
fn test_validate_rejects_blank_prefix() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seedway.yml");
    std::fs::write(&path, "script_prefix: \"\"\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_validate_rejects_empty_roots() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seedway.yml");
    std::fs::write(&path, "resource_roots: []\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}
