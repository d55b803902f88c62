//! Golden fixture tests for the rewrite chain.
//!
//! Each fixture under `<workspace>/tests/fixtures/<name>/` contains:
//!
//! - `input.yaml` - the malformed document
//! - `expected.yaml` - the document after one pass of the chain

use fs_err as fs;
use oasfix_rewrite::{RewriteContext, rewrite_document};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

const METHOD: &str = "getCompressedBalance";

fn fixture_dir(name: &str) -> PathBuf {
    // Fixtures are at workspace root: ../tests/fixtures relative to oasfix-rewrite
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().expect("workspace root");
    workspace_root.join("tests").join("fixtures").join(name)
}

fn run_fixture_test(name: &str) {
    let dir = fixture_dir(name);
    let input = fs::read_to_string(dir.join("input.yaml")).expect("read input.yaml");
    let expected = fs::read_to_string(dir.join("expected.yaml")).expect("read expected.yaml");

    let ctx = RewriteContext::new(METHOD);
    let once = rewrite_document(&ctx, &input).expect("first pass");
    assert_eq!(once.content, expected, "fixture {name}: first pass");
    assert!(once.changed(), "fixture {name}: expected at least one rewrite");

    let twice = rewrite_document(&ctx, &once.content).expect("second pass");
    assert_eq!(twice.content, once.content, "fixture {name}: second pass");
    assert!(twice.applied.is_empty(), "fixture {name}: {:?}", twice.applied);
}

#[test]
fn golden_license_url() {
    run_fixture_test("license_url");
}

#[test]
fn golden_missing_paths() {
    run_fixture_test("missing_paths");
}

#[test]
fn golden_post_missing_responses() {
    run_fixture_test("post_missing_responses");
}

#[test]
fn golden_misplaced_schemas() {
    run_fixture_test("misplaced_schemas");
}

#[test]
fn golden_fixtures_report_expected_rewrites() {
    let cases: &[(&str, &[&str])] = &[
        ("license_url", &["license-url"]),
        ("missing_paths", &["synthesize-paths"]),
        ("post_missing_responses", &["post-responses"]),
        (
            "misplaced_schemas",
            &[
                "nullable-allof",
                "description-schemas",
                "vendor-url-description-schemas",
                "duplicate-schemas",
                "duplicate-components",
            ],
        ),
    ];

    for (name, expected) in cases {
        let input = fs::read_to_string(fixture_dir(name).join("input.yaml")).unwrap();
        let outcome = rewrite_document(&RewriteContext::new(METHOD), &input).unwrap();
        assert_eq!(outcome.applied, expected.to_vec(), "fixture {name}");
    }
}
