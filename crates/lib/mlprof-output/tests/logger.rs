use std::fs;

use log::LevelFilter;

use mlprof_output::logger::{get_logging_level, log_file_path, LogSettings};
use mlprof_testutils::files::TempFile;

fn settings(overwrite: bool) -> LogSettings {
    LogSettings {
        log_path: "output".to_string(),
        log_level: "debug".to_string(),
        log_file_name: "plot.log".to_string(),
        log_overwrite: overwrite,
    }
}

#[test]
fn test_logging_levels() {
    assert_eq!(get_logging_level("trace"), LevelFilter::Trace);
    assert_eq!(get_logging_level("warn"), LevelFilter::Warn);
    assert_eq!(get_logging_level("verbose"), LevelFilter::Info);
}

#[test]
fn test_log_file_is_placed_under_logs() {
    let config_dir = TempFile::new("d");
    let path = log_file_path(config_dir.path(), &settings(true)).unwrap();
    assert_eq!(path, config_dir.path().join("output").join("logs").join("plot.log"));
    assert!(path.parent().unwrap().is_dir());
    fs::remove_dir_all(config_dir.path()).unwrap();
}

#[test]
fn test_existing_log_is_kept_without_overwrite() {
    let config_dir = TempFile::new("d");
    let first = log_file_path(config_dir.path(), &settings(false)).unwrap();
    fs::write(&first, "previous run").unwrap();

    let second = log_file_path(config_dir.path(), &settings(false)).unwrap();
    assert_ne!(first, second);
    assert!(first.exists());
    let name = second.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("plot_"));
    assert!(name.ends_with(".log"));

    let third = log_file_path(config_dir.path(), &settings(true)).unwrap();
    assert_eq!(first, third);
    assert!(!first.exists());
    fs::remove_dir_all(config_dir.path()).unwrap();
}
