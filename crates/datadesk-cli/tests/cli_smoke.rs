//! CLI binary smoke tests using assert_cmd.
//!
//! These tests drive the compiled `datadesk` binary through stdin to verify
//! argument parsing, the command shell and error reporting end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd(out_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("datadesk").unwrap();
    cmd.current_dir(out_dir);
    cmd
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn help_flag() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("datadesk"));
}

#[test]
fn config_subcommand_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"random_seed\": 42"))
        .stdout(predicate::str::contains("\"housing_target\": \"MedHouseVal\""));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["--config", "does_not_exist.json"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

#[test]
fn determinant_session() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .write_stdin("matrix input a\n2\n2\n1 2\n3, 4\nmatrix det a\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matrix A loaded: (2, 2)"))
        .stdout(predicate::str::contains("Determinant of A: -2"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn errors_are_reported_and_the_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .write_stdin("matrix add\nviz chart bar\nlr metrics\nbogus\nabout\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Both matrices needed"))
        .stdout(predicate::str::contains("Error: Load data first"))
        .stdout(predicate::str::contains("Error: Please train the model first"))
        .stdout(predicate::str::contains("Error: Unknown command 'bogus'"))
        .stdout(predicate::str::contains("DATA ANALYSIS & VISUALIZATION TOOL"));
}

#[test]
fn chart_is_rendered_to_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .write_stdin("viz sample\nviz chart pie\nviz save pie.html\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Units_Sold: 100.00"))
        .stdout(predicate::str::contains("Pie Chart: Product"));
    assert!(dir.path().join("datadesk_out").join("viz_chart.html").exists());
    assert!(dir.path().join("pie.html").exists());
}

#[test]
fn image_export_is_compiled_into_the_binary() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .write_stdin("viz sample\nviz chart bar\nviz save chart.svg\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Units_Sold by Product"))
        .stdout(predicate::str::contains("needs the `static-export` feature").not());
}
