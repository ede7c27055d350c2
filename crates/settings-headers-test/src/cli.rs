//! CLI regression tests for the `settings-headers` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes, and output formats.
//!
//! Run with: `cargo test -p settings-headers-test`
//! Requires the `settings-headers` binary to be built first
//! (`cargo build -p settings-headers`).

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

use crate::fixtures::{settings_fixture, write_security_settings, write_settings_with_headers};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `settings-headers` binary.
fn settings_headers() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("settings-headers").expect(
        "settings-headers binary not found, run `cargo build -p settings-headers` first",
    );
    cmd.env_remove("SETTINGS_SECURITY").env_remove("RUST_LOG");
    cmd
}

/// Run a command expected to succeed and return its trimmed stdout.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .expect("stdout is UTF-8")
        .trim()
        .to_string()
}

/// Write a security file with a fresh master password and return its path.
fn security_with_master(dir: &TempDir, master_password: &str) -> std::path::PathBuf {
    let master = stdout_of(settings_headers().args(["encrypt-master", master_password]));
    write_security_settings(dir.path(), &master).expect("write security settings")
}

/// Encrypt `value` with the master password stored at `security`.
fn encrypt(value: &str, security: &Path) -> String {
    stdout_of(
        settings_headers()
            .args(["encrypt", value, "--security"])
            .arg(security),
    )
}

// ---------------------------------------------------------------------------
// settings-headers check
// ---------------------------------------------------------------------------

#[test]
fn check_settings_without_headers_exits_zero() {
    settings_headers()
        .args(["check", "--settings"])
        .arg(settings_fixture("settings-with-no-headers"))
        .args(["--security", "/nonexistent/settings-security.xml"])
        .assert()
        .success()
        .stderr(contains("no-configuration: no HTTP headers"))
        .stderr(contains("configuration-without-headers: no HTTP headers"));
}

#[test]
fn check_plaintext_headers_does_not_need_security_file() {
    settings_headers()
        .args(["check", "--settings"])
        .arg(settings_fixture("settings-with-mixed-headers"))
        .args(["--security", "/nonexistent/settings-security.xml"])
        .assert()
        .success()
        .stderr(contains("my-header [http-headers]: plaintext"))
        .stderr(contains("all-header-name [http-configuration-all]: plaintext"))
        .stderr(contains("0 header value(s) decrypted"));
}

#[test]
fn check_missing_settings_exits_one() {
    settings_headers()
        .args(["check", "--settings", "this-file-does-not-exist.xml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to read settings"));
}

#[test]
fn check_unknown_format_exits_one() {
    settings_headers()
        .args(["check", "--settings"])
        .arg(settings_fixture("settings-with-no-headers"))
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unknown output format"));
}

#[test]
fn check_encrypted_headers_json_report() {
    let dir = TempDir::new().unwrap();
    let security = security_with_master(&dir, "master-password");
    let generic = encrypt("my-unencrypted-value", &security);
    let legacy = encrypt("all-unencrypted-value", &security);
    assert!(generic.starts_with('{') && generic.ends_with('}'));

    let settings = write_settings_with_headers(
        dir.path(),
        "secured",
        &[("my-header", generic.as_str())],
        &[("all-header-name", legacy.as_str())],
    )
    .unwrap();

    let stdout = stdout_of(
        settings_headers()
            .args(["check", "--format", "json", "--settings"])
            .arg(&settings)
            .arg("--security")
            .arg(&security),
    );

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["summary"]["servers"], 1);
    assert_eq!(report["summary"]["headers"], 2);
    assert_eq!(report["servers"][0]["id"], "secured");
    assert_eq!(report["servers"][0]["headers"][0]["name"], "my-header");
    assert_eq!(report["servers"][0]["headers"][0]["schema"], "http-headers");
    assert_eq!(report["servers"][0]["headers"][0]["state"], "decrypted");
    assert_eq!(
        report["servers"][0]["headers"][1]["schema"],
        "http-configuration-all"
    );
    assert!(!stdout.contains("unencrypted-value"));
}

#[test]
fn check_bad_ciphertext_names_header_and_schema() {
    let dir = TempDir::new().unwrap();
    let security = security_with_master(&dir, "master-password");
    let settings = write_settings_with_headers(
        dir.path(),
        "broken",
        &[("my-header", "{bm90IGEgdmFsaWQgcGF5bG9hZA==}")],
        &[],
    )
    .unwrap();

    settings_headers()
        .args(["check", "--settings"])
        .arg(&settings)
        .arg("--security")
        .arg(&security)
        .assert()
        .failure()
        .code(1)
        .stderr(contains(
            "Unable to decrypt header my-header in generic wagon configuration",
        ));
}

#[test]
fn check_encrypted_header_without_security_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let settings = write_settings_with_headers(
        dir.path(),
        "secured",
        &[],
        &[("all-header-name", "{c29tZSBwYXlsb2Fk}")],
    )
    .unwrap();

    settings_headers()
        .args(["check", "--settings"])
        .arg(&settings)
        .args(["--security", "/nonexistent/settings-security.xml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains(
            "Unable to decrypt header all-header-name in legacy wagon httpClient (all) configuration",
        ))
        .stderr(contains("failed to read security settings"));
}

// ---------------------------------------------------------------------------
// settings-headers encrypt-master / encrypt
// ---------------------------------------------------------------------------

#[test]
fn encrypt_master_prints_decorated_value() {
    settings_headers()
        .args(["encrypt-master", "master-password"])
        .assert()
        .success()
        .stdout(contains("{").and(contains("}")))
        .stdout(contains("master-password").not());
}

#[test]
fn encrypt_without_master_exits_one() {
    let dir = TempDir::new().unwrap();
    let security = dir.path().join("settings-security.xml");
    std::fs::write(&security, "<settingsSecurity/>").unwrap();

    settings_headers()
        .args(["encrypt", "value", "--security"])
        .arg(&security)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("master password is not set"));
}

#[test]
fn unknown_log_format_exits_one() {
    settings_headers()
        .args(["--log-format", "xml", "encrypt-master", "pw"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unknown log format"));
}
