// tests/logging_control.rs
//
// Installs the global subscriber, so this binary holds a single test.

use tempfile::tempdir;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use triggerd::cli::LogLevel;
use triggerd::logging::init_logging;

#[test]
fn elevated_level_is_restored_when_guard_drops() {
    let dir = tempdir().unwrap();
    let log_file = dir.path().join("triggerd.log");
    let control = init_logging(Some(LogLevel::Warn), false, Some(&log_file)).unwrap();

    assert_eq!(control.level(), Some(LevelFilter::WARN));
    info!("hidden before");
    warn!("visible warning");

    {
        let _guard = control.elevate(LevelFilter::DEBUG);
        assert_eq!(control.level(), Some(LevelFilter::DEBUG));
        debug!("visible while elevated");
    }

    assert_eq!(control.level(), Some(LevelFilter::WARN));
    debug!("hidden after");

    let text = std::fs::read_to_string(&log_file).unwrap();
    assert!(text.contains("visible warning"));
    assert!(text.contains("visible while elevated"));
    assert!(!text.contains("hidden before"));
    assert!(!text.contains("hidden after"));
}
