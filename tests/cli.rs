//! Integration test suite for the `jv` CLI
use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// Helper function to run the `main` binary with the given arguments and
/// return a [`assert_cmd::assert::Assert`].
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("jv").expect("Failed to find main binary");
    cmd.args(args);
    cmd.assert()
}

/// Write a fixture file into `dir`.
fn write_fixture(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write fixture");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_of_valid_files_passes() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "a.json", r#"{"key":"value"}"#);
        write_fixture(dir.path(), "b.json", "[1, 2, 3]");
        write_fixture(dir.path(), "notes.txt", "not json, skipped");

        let assert = run_main(&[dir.path().to_str().unwrap()]).success().code(0);
        let stdout =
            String::from_utf8(assert.get_output().stdout.clone()).expect("Invalid UTF-8 output");
        assert_eq!(stdout.matches("PASS").count(), 2, "got: {stdout}");
        assert!(!stdout.contains("notes.txt"), "got: {stdout}");
    }

    #[test]
    fn expected_failures_keep_exit_code_zero() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "pass1.json", r#"{"k": true}"#);
        write_fixture(dir.path(), "fail_trailing_comma.json", "[1,]");
        write_fixture(dir.path(), "fail_unterminated.json", "\"oops");

        run_main(&[dir.path().to_str().unwrap()]).success().code(0);
    }

    #[test]
    fn unexpected_failure_flips_exit_code() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "broken.json", "[1,,2]");

        let assert = run_main(&[dir.path().to_str().unwrap()]).failure().code(1);
        let stdout =
            String::from_utf8(assert.get_output().stdout.clone()).expect("Invalid UTF-8 output");
        assert!(stdout.contains("FAIL"), "got: {stdout}");
    }

    #[test]
    fn fail_named_file_that_validates_flips_exit_code() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "fail_but_actually_fine.json", "{}");

        run_main(&[dir.path().to_str().unwrap()]).failure().code(1);
    }

    #[test]
    fn single_file_check() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "doc.json", r#"{"nested":[{"a":null}]}"#);
        let file = dir.path().join("doc.json");

        let assert = run_main(&[file.to_str().unwrap()]).success().code(0);
        let stdout =
            String::from_utf8(assert.get_output().stdout.clone()).expect("Invalid UTF-8 output");
        assert!(stdout.contains("PASS"), "got: {stdout}");
    }

    #[test]
    fn strict_rejects_bare_scalar() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "scalar.json", "42");
        let file = dir.path().join("scalar.json");

        // Valid by default...
        run_main(&[file.to_str().unwrap()]).success();
        // ...but not under the document profile.
        run_main(&["--strict", file.to_str().unwrap()]).failure().code(1);
    }

    #[test]
    fn max_depth_flag_caps_nesting() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "deep.json", "[[[[[1]]]]]");
        let file = dir.path().join("deep.json");

        run_main(&[file.to_str().unwrap()]).success();
        run_main(&["--max-depth", "3", file.to_str().unwrap()])
            .failure()
            .code(1);
    }

    #[test]
    fn summary_prints_totals() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture(dir.path(), "a.json", "true");
        write_fixture(dir.path(), "fail_b.json", "[,]");

        let assert = run_main(&["--summary", dir.path().to_str().unwrap()]).success();
        let stdout =
            String::from_utf8(assert.get_output().stdout.clone()).expect("Invalid UTF-8 output");
        assert!(stdout.contains("1 passed, 1 failed, 2 total"), "got: {stdout}");
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        run_main(&[dir.path().to_str().unwrap()]).failure();
    }

    #[test]
    fn no_args_shows_help() {
        run_main(&[]).failure();
    }
}
