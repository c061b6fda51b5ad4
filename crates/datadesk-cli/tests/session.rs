//! Shell sessions driven over in-memory input and output.

use std::fs;

use datadesk::config::AppConfig;
use datadesk::math::Slot;
use datadesk::Workbench;
use datadesk_cli::shell::{run_script, Shell};

fn workbench(dir: &std::path::Path) -> Workbench {
    Workbench::new(AppConfig {
        output_dir: dir.join("out"),
        ..AppConfig::default()
    })
}

#[test]
fn matrix_form_restarts_after_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = "matrix input b\n2\n2\n1 2\n3\n2\n2\n1 0\n0 1\nmatrix show\n";
    let mut shell = Shell::new(workbench(dir.path()), script.as_bytes(), Vec::new());
    shell.run().unwrap();

    let matrix = shell.workbench().matrices().get(Slot::B).unwrap();
    assert_eq!(matrix.shape(), (2, 2));
    let out = String::from_utf8(shell.into_output()).unwrap();
    assert!(out.contains("Error: Invalid format: Each row must have 2 columns"), "{}", out);
    assert!(out.contains("Matrix B: 2x2"), "{}", out);
}

#[test]
fn cancelled_form_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let script = "matrix input a\n0\n3\nx\ncancel\nmatrix show\n";
    let out = run_script(workbench(dir.path()), script).unwrap();
    assert!(out.contains("Error: Invalid format: Rows and Columns must be positive"), "{}", out);
    assert!(out.contains("Cancelled; nothing changed."), "{}", out);
    assert!(out.contains("Matrix A: Not loaded"), "{}", out);
}

#[test]
fn huge_row_count_is_rejected_and_the_form_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let script = "matrix input a\n1000000000000000000\n2\n1\n2\n5 6\nmatrix det a\n";
    let mut shell = Shell::new(workbench(dir.path()), script.as_bytes(), Vec::new());
    shell.run().unwrap();

    assert_eq!(shell.workbench().matrices().get(Slot::A).unwrap().shape(), (1, 2));
    let out = String::from_utf8(shell.into_output()).unwrap();
    assert!(
        out.contains("Error: Invalid format: Rows must be at most 1000, got 1000000000000000000"),
        "{}",
        out
    );
    assert!(out.contains("Error: Matrix A must be square, got 1x2"), "{}", out);
}

#[test]
fn dimension_mismatch_is_shown() {
    let dir = tempfile::tempdir().unwrap();
    let script = "matrix input a\n1\n2\n1 2\nmatrix input b\n1\n3\n1 2 3\nmatrix add\nmatrix mul\nmatrix swap\nmatrix mul\n";
    let out = run_script(workbench(dir.path()), script).unwrap();
    assert!(out.contains("Error: Add: Same dimensions required (A is 1x2, B is 1x3)"), "{}", out);
    assert!(out.contains("Error: Multiply: Column of A must equal row of B"), "{}", out);
    assert!(out.contains("Matrices swapped successfully!"), "{}", out);
    // after the swap A is 1x3 and B is 1x2: still incompatible
    assert_eq!(out.matches("Error: Multiply").count(), 2, "{}", out);
}

#[test]
fn regression_workflow_with_target_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("data.csv");
    let mut body = String::from("x1,x2,label,y\n");
    for i in 0..25 {
        let x1 = i as f64;
        let x2 = ((i * 7) % 5) as f64;
        body.push_str(&format!("{},{},g{},{}\n", x1, x2, i % 3, 3.0 * x1 - x2 + 1.0));
    }
    fs::write(&csv, body).unwrap();

    let script = format!(
        "lr train\nlr csv {}\n\nlabel\n4\nlr train\nlr coefficients\nlr metrics\nlr synthetic\nlr predictions\n",
        csv.display()
    );
    let out = run_script(workbench(dir.path()), &script).unwrap();

    assert!(out.contains("Error: Please load data first"), "{}", out);
    assert!(out.contains("  4. y"), "{}", out);
    assert!(out.contains("Error: Please select a target column"), "{}", out);
    assert!(out.contains("Error: Failed to load data: Target column 'label' must be numeric"), "{}", out);
    assert!(out.contains("Samples: 25\nFeatures: 2"), "{}", out);
    assert!(out.contains("Model trained successfully!"), "{}", out);
    assert!(out.contains("Feature Importance (Coefficients)"), "{}", out);
    assert!(out.contains("MODEL PERFORMANCE METRICS"), "{}", out);
    // fresh data discards the model
    let reloaded = out
        .find("✓ Sample Data Generated | 100 samples, 3 features")
        .expect("synthetic status");
    assert!(out[reloaded..].contains("Error: Please train the model first"), "{}", out);
}

#[test]
fn reset_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let script = "viz sample\nlr synthetic\nstatus\nreset\nstatus\n";
    let out = run_script(workbench(dir.path()), script).unwrap();
    assert!(out.contains("Dataset: 6 rows x 4 columns"), "{}", out);
    assert!(out.contains("Refreshed ✓"), "{}", out);
    assert!(out.contains("Regression: No data loaded"), "{}", out);
}
