//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `phylomat` binary end-to-end: argument
//! parsing, matrix file input, stdout/file output and failure exit codes.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("phylomat").unwrap()
}

fn write_matrix(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("invert"))
        .stdout(predicate::str::contains("multiply"))
        .stdout(predicate::str::contains("transpose"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("phylomat"));
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[test]
fn invert_prints_inverse() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "4 7\n2 6\n");
    cmd()
        .args(["invert", path.to_str().unwrap(), "--rows", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.600000"))
        .stdout(predicate::str::contains("-0.700000"))
        .stdout(predicate::str::contains("-0.200000"))
        .stdout(predicate::str::contains("0.400000"));
}

#[test]
fn invert_singular_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "1 2\n1 2\n");
    cmd()
        .args(["invert", path.to_str().unwrap(), "--rows", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("singular"));
}

#[test]
fn invert_missing_rows_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "1 0 0 1");
    cmd()
        .args(["invert", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rows"));
}

#[test]
fn multiply_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_matrix(&dir, "a.txt", "1 2 3\n4 5 6\n");
    let b = write_matrix(&dir, "b.txt", "1\n0\n-1\n");
    let out = dir.path().join("prod.txt");
    cmd()
        .args([
            "multiply",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--rows",
            "2",
            "--cols",
            "3",
            "--b-cols",
            "1",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();
    let written = std::fs::read_to_string(out).unwrap();
    assert_eq!(written, "  -2.000000 \n  -2.000000 \n");
}

#[test]
fn transpose_swaps_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "1 2 3\n");
    cmd()
        .args(["transpose", path.to_str().unwrap(), "--rows", "1", "--cols", "3"])
        .assert()
        .success()
        .stdout("   1.000000 \n   2.000000 \n   3.000000 \n");
}

#[test]
fn print_uses_scientific_for_tiny_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "0.00001 1");
    cmd()
        .args(["print", path.to_str().unwrap(), "--rows", "1", "--cols", "2"])
        .assert()
        .success()
        .stdout("  1.000000e-05   1.000000e+00 \n");
}

#[test]
fn short_input_fails_unless_lenient() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "1 2 3");
    cmd()
        .args(["print", path.to_str().unwrap(), "--rows", "2", "--cols", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end of input"));
    cmd()
        .args(["print", path.to_str().unwrap(), "--rows", "2", "--cols", "2", "--lenient"])
        .assert()
        .success()
        .stdout("   1.000000    2.000000 \n   3.000000    0.000000 \n");
}

#[test]
fn config_file_controls_print_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "0.5 2");
    let config = write_matrix(&dir, "config.json", r#"{"print": {"fixed_width": 6, "precision": 2}}"#);
    cmd()
        .args([
            "print",
            path.to_str().unwrap(),
            "--rows",
            "1",
            "--cols",
            "2",
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("  0.50   2.00 \n");
}

#[test]
fn default_config_logged_at_debug_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "1");
    cmd()
        .env("PHYLOMAT_LOG", "debug")
        .args(["print", path.to_str().unwrap(), "--rows", "1", "--cols", "1"])
        .assert()
        .success()
        .stdout("   1.000000 \n")
        .stderr(predicate::str::contains("No config provided"))
        .stderr(predicate::str::contains("\"read_policy\": \"strict\""));
}

#[test]
fn nonexistent_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_matrix(&dir, "m.txt", "1");
    cmd()
        .args([
            "print",
            path.to_str().unwrap(),
            "--rows",
            "1",
            "--cols",
            "1",
            "--config",
            "/nonexistent/config.json",
        ])
        .assert()
        .failure();
}
