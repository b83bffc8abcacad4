use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_packdeck");

#[test]
fn test_version_flag() {
    let output = Command::new(BIN).arg("--version").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("packdeck ").unwrap_or("");
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_help_flag_prints_usage() {
    let output = Command::new(BIN).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--backend"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_missing_flag_value_exits_2() {
    let output = Command::new(BIN).arg("--backend").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--backend needs a URL"));
}
