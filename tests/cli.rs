//! End-to-end tests of the `vatu` binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use common::{envelope, income, FakeBackend, Reply};

fn vatu(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vatu").unwrap();
    cmd.env("VATU_DATA_DIR", data_dir.path())
        .env_remove("VATU_API_URL")
        .env_remove("VATU_ACCESS_TOKEN")
        .env_remove("VATU_LOG");
    cmd
}

#[test]
fn test_help_lists_command_groups() {
    let data_dir = TempDir::new().unwrap();
    vatu(&data_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("envelope"))
        .stdout(predicate::str::contains("recurring"))
        .stdout(predicate::str::contains("fund"));
}

#[test]
fn test_config_init_and_show() {
    let data_dir = TempDir::new().unwrap();

    vatu(&data_dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized vatu-tracker"));
    assert!(data_dir.path().join("config.json").exists());

    vatu(&data_dir)
        .args(["config", "set-threshold", "70"])
        .assert()
        .success();

    vatu(&data_dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70%"))
        .stdout(predicate::str::contains("http://localhost:8000/api"));
}

#[test]
fn test_config_rejects_out_of_range_threshold() {
    let data_dir = TempDir::new().unwrap();
    vatu(&data_dir)
        .args(["config", "set-threshold", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"));
}

#[test]
fn test_envelope_list_renders_table() {
    let backend = FakeBackend::start(|_, url, _| match url {
        "/envelopes/" => Reply::json(json!([
            envelope(1, "Groceries", "300.00", "120.00"),
            envelope(2, "Fuel", "80.00", "95.50"),
        ])),
        _ => Reply::status(404, json!({"detail": "Not found."})),
    });
    let data_dir = TempDir::new().unwrap();

    vatu(&data_dir)
        .args(["--api-url", &backend.base_url, "--token", "abc", "envelope", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Fuel"));

    assert_eq!(
        backend.requests()[0].authorization.as_deref(),
        Some("Bearer abc")
    );
}

#[test]
fn test_unknown_envelope_fails() {
    let backend = FakeBackend::start(|_, url, _| match url {
        "/envelopes/" => Reply::json(json!([envelope(1, "Groceries", "300.00", "120.00")])),
        _ => Reply::status(404, json!({"detail": "Not found."})),
    });
    let data_dir = TempDir::new().unwrap();

    vatu(&data_dir)
        .args(["--api-url", &backend.base_url, "envelope", "show", "Holidays"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_fund_plan_is_not_submitted_without_apply() {
    let backend = FakeBackend::start(|method, url, _| match (method, url) {
        ("GET", "/income/") => Reply::json(income("1000.00", "900.00", "100.00")),
        ("GET", "/envelopes/") => Reply::json(json!([
            envelope(1, "Groceries", "100.00", "40.00"),
            envelope(2, "Rent", "200.00", "50.00"),
        ])),
        _ => Reply::status(500, json!({"detail": "unexpected write"})),
    });
    let data_dir = TempDir::new().unwrap();

    vatu(&data_dir)
        .args(["--api-url", &backend.base_url, "fund", "smart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("--apply"));

    assert!(backend.requests().iter().all(|r| r.method == "GET"));
}

#[test]
fn test_server_validation_errors_are_reported() {
    let backend = FakeBackend::start(|method, url, _| match (method, url) {
        ("GET", "/categories/") => Reply::json(json!([])),
        ("POST", "/categories/") => Reply::status(
            400,
            json!({"name": ["Category with this name already exists."]}),
        ),
        _ => Reply::status(404, json!({"detail": "Not found."})),
    });
    let data_dir = TempDir::new().unwrap();

    vatu(&data_dir)
        .args(["--api-url", &backend.base_url, "category", "create", "Rent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
