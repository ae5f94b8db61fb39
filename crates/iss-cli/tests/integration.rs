#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn notifier(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("iss-notifier").unwrap();
    cmd.current_dir(dir.path())
        .env("ISS_NOTIFIER_CONFIG", config_path(dir))
        .env_remove("ISS_SMTP_PASSWORD")
        .env_remove("ISS_NOTIFIER_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn config_path(dir: &TempDir) -> PathBuf {
    dir.path().join("iss-notifier.yaml")
}

fn write_config(dir: &TempDir, yaml: &str) {
    std::fs::write(config_path(dir), yaml).unwrap();
}

const VALID: &str = "\
observer:
  latitude: 51.51
  longitude: -0.13
email:
  sender: me@example.com
  password: hunter2
  recipient: you@example.com
";

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_example_config() {
    let dir = TempDir::new().unwrap();
    notifier(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let content = std::fs::read_to_string(config_path(&dir)).unwrap();
    assert!(content.contains("observer:"));
    assert!(content.contains("smtp.gmail.com"));
    assert!(content.contains("iss-now.json"));
}

#[test]
fn init_keeps_existing_config_unless_forced() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, VALID);

    notifier(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
    assert_eq!(std::fs::read_to_string(config_path(&dir)).unwrap(), VALID);

    notifier(&dir).args(["init", "--force"]).assert().success();
    let content = std::fs::read_to_string(config_path(&dir)).unwrap();
    assert!(content.contains("your.email@gmail.com"));
}

#[test]
fn config_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("nested/custom.yaml");
    notifier(&dir)
        .arg("--config")
        .arg(&custom)
        .arg("init")
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!config_path(&dir).exists());
}

// ---------------------------------------------------------------------------
// config validate / show
// ---------------------------------------------------------------------------

#[test]
fn validate_example_config_reports_missing_password() {
    let dir = TempDir::new().unwrap();
    notifier(&dir).arg("init").assert().success();

    notifier(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] email.password is empty"));
}

#[test]
fn validate_accepts_password_from_env() {
    let dir = TempDir::new().unwrap();
    notifier(&dir).arg("init").assert().success();

    notifier(&dir)
        .env("ISS_SMTP_PASSWORD", "app-password")
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn validate_json_lists_warnings() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, &format!("{VALID}poll:\n  tolerance_deg: 40\n"));

    let out = notifier(&dir)
        .args(["config", "validate", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["warnings"][0]["level"], "warning");
}

#[test]
fn show_redacts_password() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, VALID);

    notifier(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("me@example.com"))
        .stdout(predicate::str::contains("hunter2").not());
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_without_config_fails() {
    let dir = TempDir::new().unwrap();
    notifier(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"));
}

#[test]
fn run_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    notifier(&dir).arg("init").assert().success();

    notifier(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("has errors"));
}

#[test]
fn log_file_receives_log_lines() {
    let dir = TempDir::new().unwrap();
    notifier(&dir).arg("init").assert().success();

    notifier(&dir)
        .args(["--log-file", "iss_tracker.log", "run"])
        .assert()
        .failure();

    let log = std::fs::read_to_string(dir.path().join("iss_tracker.log")).unwrap();
    assert!(log.contains("ERROR"), "{log}");
    assert!(log.contains("email.password is empty"), "{log}");
    assert!(!log.contains("\x1b["), "{log}");
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[test]
fn status_reports_overhead_against_mock_providers() {
    let mut server = mockito::Server::new();
    let _pos = server
        .mock("GET", "/iss-now.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"message": "success", "timestamp": 1740787200,
                "iss_position": {"latitude": "53.0", "longitude": "1.5"}}"#,
        )
        .create();
    // A "day" that spans the whole century, so it is never dark.
    let _sun = server
        .mock("GET", "/json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results": {"sunrise": "2000-01-01T00:00:00+00:00",
                            "sunset": "2100-01-01T00:00:00+00:00"},
                "status": "OK"}"#,
        )
        .create();

    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        &format!(
            "{VALID}endpoints:\n  position_url: {url}/iss-now.json\n  sun_times_url: {url}/json\n",
            url = server.url()
        ),
    );

    let out = notifier(&dir).args(["status", "--json"]).output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["overhead"], true);
    assert_eq!(json["dark"], false);
    assert_eq!(json["would_notify"], false);
    assert_eq!(json["satellite"]["coordinates"]["latitude"], 53.0);
}

#[test]
fn status_surfaces_provider_errors() {
    let mut server = mockito::Server::new();
    let _pos = server
        .mock("GET", "/iss-now.json")
        .with_status(500)
        .create();

    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        &format!(
            "{VALID}endpoints:\n  position_url: {}/iss-now.json\n",
            server.url()
        ),
    );

    notifier(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 500"));
}
