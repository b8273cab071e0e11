use super::*;

#[test]
fn watcher_defaults_match_spec() {
    let w = WatcherConfig::default();
    assert_eq!(w.scan_interval_seconds, 30);
    assert_eq!(w.heartbeat_interval_seconds, 300);
    assert_eq!(w.post_handler_command, None);
    assert!(!w.dry_run);
}

#[test]
fn supervisor_auto_restart_defaults_on() {
    assert!(SupervisorConfig::default().auto_restart);
}

#[test]
fn database_defaults_are_applied_when_omitted() {
    let yaml = "url: postgres://localhost/flagline\n";
    let db: DatabaseConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(db.pool_size, 5);
    assert_eq!(db.query_timeout_seconds, 10);
    assert_eq!(db.max_retries, 3);
}

#[test]
fn full_config_parses_with_all_sections() {
    let yaml = r#"
nas_root: /mnt/shared/flagline
database:
  url: postgres://localhost/flagline
  pool_size: 10
watcher:
  scan_interval_seconds: 15
supervisor:
  auto_restart: false
logging:
  level: debug
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.nas_root, PathBuf::from("/mnt/shared/flagline"));
    assert_eq!(config.database.pool_size, 10);
    assert_eq!(config.watcher.scan_interval_seconds, 15);
    assert!(!config.supervisor.auto_restart);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn omitted_sections_fall_back_to_defaults() {
    let yaml = r#"
nas_root: /mnt/shared/flagline
database:
  url: postgres://localhost/flagline
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.watcher, WatcherConfig::default());
    assert_eq!(config.supervisor, SupervisorConfig::default());
    assert_eq!(config.console, ConsoleConfig::default());
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn console_cleanup_defaults_to_delete() {
    assert_eq!(ConsoleConfig::default().archive_dir, None);
}
