//! CLI integration tests for the pahakia binary.

use assert_cmd::Command;
use predicates::prelude::*;

const CATALOG: &str = r#"
[codes.test_fault]
code = "main.test.fault"
num_args = 2
template = "{0}: {1}"
"#;

#[allow(deprecated)]
fn pahakia_cmd() -> Command {
    Command::cargo_bin("pahakia").expect("Failed to find pahakia binary")
}

fn catalog_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("faults.toml");
    std::fs::write(&path, CATALOG).expect("Failed to write catalog");
    (dir, path)
}

#[test]
fn test_check_lists_codes() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("main.test.fault (2 args): {0}: {1}"))
        .stdout(predicate::str::contains("1 fault code(s) OK"));
}

#[test]
fn test_render_message() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .args(["render"])
        .arg(&path)
        .args(["main.test.fault", "hello", "world"])
        .assert()
        .success()
        .stdout("main.test.fault: hello: world\n");
}

#[test]
fn test_render_json() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .arg("render")
        .arg(&path)
        .args(["main.test.fault", "a", "b", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"main.test.fault\""))
        .stdout(predicate::str::contains("\"message\": \"main.test.fault: a: b\""));
}

#[test]
fn test_render_wrong_argument_count() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .arg("render")
        .arg(&path)
        .args(["main.test.fault", "only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hint: main.test.fault takes 2 argument(s)"))
        .stderr(predicate::str::contains("pahakia.fault.CodeNumArgsNoMatch"));
}

#[test]
fn test_render_unknown_code() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .arg("render")
        .arg(&path)
        .arg("main.other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pahakia.fault.UnknownCode"));
}

#[test]
fn test_env_overrides_catalog_entry() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .env("PAHAKIA__CODES__TEST_FAULT__TEMPLATE", "{0} / {1}")
        .arg("render")
        .arg(&path)
        .args(["main.test.fault", "hello", "world"])
        .assert()
        .success()
        .stdout("main.test.fault: hello / world\n");
}

#[test]
fn test_env_overrides_argument_count() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .env("PAHAKIA__CODES__TEST_FAULT__NUM_ARGS", "1")
        .env("PAHAKIA__CODES__TEST_FAULT__TEMPLATE", "only {0}")
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("main.test.fault (1 args): only {0}"));
}

#[test]
fn test_env_override_for_unknown_entry_fails() {
    let (_dir, path) = catalog_file();
    pahakia_cmd()
        .env("PAHAKIA__CODES__GHOST__TEMPLATE", "boo")
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ConfigError"));
}

#[test]
fn test_check_missing_file() {
    pahakia_cmd()
        .args(["check", "/no/such/catalog.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pahakia.fault.CatalogNotFound"));
}

#[test]
fn test_builtin_lists_reserved_codes() {
    pahakia_cmd()
        .arg("builtin")
        .assert()
        .success()
        .stdout(predicate::str::contains("pahakia.fault.CodeIsMandatory (0 args)"))
        .stdout(predicate::str::contains("pahakia.fault.CatalogNotFound (1 args)"));
}
