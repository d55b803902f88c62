//! End-to-end tests for the `oasfix` binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LICENSED: &str = "\
openapi: 3.0.0
info:
  title: getCompressedAccount
  license:
    name: Apache-2.0
paths:
  /:
    post:
      responses: {}
";

const NO_ANCHOR: &str = "openapi: 3.0.0\ninfo:\n  title: nothing here\n";

fn oasfix() -> Command {
    Command::cargo_bin("oasfix").expect("oasfix binary")
}

fn create_docs_dir() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let docs = td.path().join("openapi").join("zk-compression");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("getCompressedAccount.yaml"), LICENSED).unwrap();
    td
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("read file")
}

#[test]
fn test_no_args_fixes_default_directory() {
    let temp = create_docs_dir();

    oasfix()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fixed: openapi/zk-compression/getCompressedAccount.yaml",
        ))
        .stdout(predicate::str::ends_with("All files processed!\n"));

    let fixed = read(temp.path().join("openapi/zk-compression/getCompressedAccount.yaml"));
    assert!(fixed.contains(
        "  license:\n    name: Apache-2.0\n    url: https://www.apache.org/licenses/LICENSE-2.0.html\n"
    ));
}

#[test]
fn test_failing_file_keeps_exit_code_zero() {
    let temp = create_docs_dir();
    let docs = temp.path().join("openapi/zk-compression");
    fs::write(docs.join("broken.yaml"), NO_ANCHOR).unwrap();

    oasfix()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Error processing broken.yaml: "))
        .stdout(predicate::str::contains("Fixed: "))
        .stdout(predicate::str::contains("All files processed!"));

    assert_eq!(read(docs.join("broken.yaml")), NO_ANCHOR);
}

#[test]
fn test_missing_directory_exits_one() {
    let temp = tempfile::tempdir().unwrap();

    oasfix()
        .current_dir(temp.path())
        .args(["--dir", "does-not-exist"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("All files processed!").not());
}

#[test]
fn test_dry_run_prints_diff_and_writes_nothing() {
    let temp = create_docs_dir();
    let file = temp.path().join("openapi/zk-compression/getCompressedAccount.yaml");

    oasfix()
        .current_dir(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git a/"))
        .stdout(predicate::str::contains(
            "+    url: https://www.apache.org/licenses/LICENSE-2.0.html",
        ));

    assert_eq!(read(&file), LICENSED);
}

#[test]
fn test_custom_dir_ext_and_license_url() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("specs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("getSlot.yml"), LICENSED).unwrap();
    fs::write(docs.join("ignored.yaml"), LICENSED).unwrap();

    oasfix()
        .current_dir(temp.path())
        .args(["--dir", "specs", "--ext", ".yml"])
        .args(["--license-url", "https://example.com/LICENSE"])
        .assert()
        .success();

    assert!(read(docs.join("getSlot.yml")).contains("    url: https://example.com/LICENSE\n"));
    assert_eq!(read(docs.join("ignored.yaml")), LICENSED);
}

#[test]
fn test_config_file_sets_directory_and_cli_overrides_it() {
    let temp = tempfile::tempdir().unwrap();
    for dir in ["from-config", "from-cli"] {
        fs::create_dir_all(temp.path().join(dir)).unwrap();
        fs::write(temp.path().join(dir).join("getSlot.yaml"), LICENSED).unwrap();
    }
    fs::write(
        temp.path().join("oasfix.toml"),
        "[fix]\ndir = \"from-config\"\n",
    )
    .unwrap();

    oasfix()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed: from-config/getSlot.yaml"));
    assert_eq!(read(temp.path().join("from-cli/getSlot.yaml")), LICENSED);

    oasfix()
        .current_dir(temp.path())
        .args(["--dir", "from-cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed: from-cli/getSlot.yaml"));
    assert_ne!(read(temp.path().join("from-cli/getSlot.yaml")), LICENSED);
}

#[test]
fn test_invalid_config_exits_one() {
    let temp = create_docs_dir();
    fs::write(temp.path().join("oasfix.toml"), "[fix\n").unwrap();

    oasfix().current_dir(temp.path()).assert().code(1);
}

#[test]
fn test_report_is_written_as_json() {
    let temp = create_docs_dir();
    let docs = temp.path().join("openapi/zk-compression");
    fs::write(docs.join("broken.yaml"), NO_ANCHOR).unwrap();

    oasfix()
        .current_dir(temp.path())
        .args(["--report", "report.json"])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&read(temp.path().join("report.json"))).expect("report json");
    assert_eq!(report["schema"], "oasfix.report.v1");
    assert_eq!(report["summary"]["files_seen"], 2);
    assert_eq!(report["summary"]["fixed"], 1);
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["files"][0]["status"], "failed");
    assert_eq!(report["files"][1]["rewrites"][0], "license-url");
}

#[test]
fn test_unwritable_report_exits_one() {
    let temp = create_docs_dir();

    oasfix()
        .current_dir(temp.path())
        .args(["--report", "no/such/dir/report.json"])
        .assert()
        .code(1);
}

#[test]
fn test_list_rewrites_text() {
    oasfix()
        .arg("list-rewrites")
        .assert()
        .success()
        .stdout(predicate::str::contains("license-url"))
        .stdout(predicate::str::contains("synthesize-paths"))
        .stdout(predicate::str::contains("empty-components"));
}

#[test]
fn test_list_rewrites_json_is_ordered() {
    let out = oasfix()
        .args(["list-rewrites", "--format", "json"])
        .output()
        .expect("run oasfix");
    assert!(out.status.success());

    let rewrites: Vec<serde_json::Value> =
        serde_json::from_slice(&out.stdout).expect("json listing");
    assert_eq!(rewrites.len(), 10);
    assert_eq!(rewrites[0]["id"], "license-url");
    assert_eq!(rewrites[6]["id"], "synthesize-paths");
    assert_eq!(rewrites[9]["order"], 10);
}

#[test]
fn test_invalid_format_fails() {
    oasfix()
        .args(["list-rewrites", "--format", "yaml"])
        .assert()
        .failure();
}
