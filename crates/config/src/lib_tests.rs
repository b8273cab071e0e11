use super::*;
use std::io::Write as _;
use tempfile::NamedTempFile;

#[test]
fn load_str_substitutes_then_parses() {
    std::env::set_var("FLAGLINE_TEST_DB_HOST", "db.internal");
    let yaml = r#"
nas_root: /mnt/shared/flagline
database:
  url: postgres://flagline@${FLAGLINE_TEST_DB_HOST}/app
"#;
    let config = load_str(yaml).unwrap();
    assert_eq!(config.database.url, "postgres://flagline@db.internal/app");
    std::env::remove_var("FLAGLINE_TEST_DB_HOST");
}

#[test]
fn load_str_fails_fast_on_missing_required_var() {
    std::env::remove_var("FLAGLINE_TEST_MISSING_VAR");
    let yaml = r#"
nas_root: /mnt/shared/flagline
database:
  url: postgres://flagline@${FLAGLINE_TEST_MISSING_VAR}/app
"#;
    let err = load_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(_)));
}

#[test]
fn load_reads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "nas_root: /mnt/shared/flagline\ndatabase:\n  url: postgres://localhost/app\n"
    )
    .unwrap();
    let config = load(file.path()).unwrap();
    assert_eq!(config.nas_root, std::path::PathBuf::from("/mnt/shared/flagline"));
}

#[test]
fn load_reports_missing_file() {
    let err = load(std::path::Path::new("/no/such/config.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
