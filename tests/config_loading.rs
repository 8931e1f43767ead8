use std::error::Error;
use std::fs;
use std::path::PathBuf;

use watcherd::config::{load_and_validate, resolve_config_path};
use watcherd::errors::WatcherdError;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> Result<(tempfile::TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("watcherd.toml");
    fs::write(&path, contents)?;
    Ok((dir, path))
}

#[test]
fn full_config_maps_to_watch_specs() -> TestResult {
    let (_dir, path) = write_config(
        r#"
[default]
logfile = "/var/log/watcherd.log"
pidfile = "/run/watcherd.pid"

[watch.docs]
watch = "/srv/docs"
events = "create, delete"
recursive = true
autoadd = true
excluded = ".*\\.swp$, .*~$"
command = "echo ${filename}"

[watch.uploads]
watch = "/srv/uploads"
events = "write_close"
command = "process ${filename}"
"#,
    )?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.default.logfile, PathBuf::from("/var/log/watcherd.log"));
    assert_eq!(cfg.default.pidfile, PathBuf::from("/run/watcherd.pid"));

    let specs = cfg.watch_specs();
    assert_eq!(specs.len(), 2);

    let docs = specs.iter().find(|s| s.name == "docs").unwrap();
    assert_eq!(docs.path, PathBuf::from("/srv/docs"));
    assert!(docs.recursive);
    assert!(docs.auto_add);
    assert_eq!(docs.event_names, vec!["create", "delete"]);
    assert_eq!(docs.exclude_patterns, vec![r".*\.swp$", ".*~$"]);
    assert_eq!(docs.command_template, "echo ${filename}");

    let uploads = specs.iter().find(|s| s.name == "uploads").unwrap();
    assert!(!uploads.recursive);
    assert!(!uploads.auto_add);
    assert!(uploads.exclude_patterns.is_empty());

    Ok(())
}

#[test]
fn missing_default_section_uses_fallback_paths() -> TestResult {
    let (_dir, path) = write_config(
        r#"
[watch.docs]
watch = "/srv/docs"
events = "create"
command = "echo ${filename}"
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.default.logfile, PathBuf::from("/tmp/watcherd.log"));
    assert_eq!(cfg.default.pidfile, PathBuf::from("/tmp/watcherd.pid"));

    Ok(())
}

#[test]
fn config_without_watches_is_rejected() -> TestResult {
    let (_dir, path) = write_config("[default]\n")?;

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, WatcherdError::Config(_)));

    Ok(())
}

#[test]
fn watch_without_command_is_rejected() -> TestResult {
    let (_dir, path) = write_config(
        r#"
[watch.docs]
watch = "/srv/docs"
events = "create"
"#,
    )?;

    assert!(load_and_validate(&path).is_err());

    Ok(())
}

#[test]
fn unreadable_config_is_a_config_error() {
    let err = load_and_validate("/nonexistent/watcherd.toml").unwrap_err();
    assert!(matches!(err, WatcherdError::Config(_)));
}

#[test]
fn explicit_config_path_wins() -> TestResult {
    let path = PathBuf::from("/somewhere/else.toml");
    let resolved = resolve_config_path(Some(&path))?;
    assert_eq!(resolved, path);

    Ok(())
}
