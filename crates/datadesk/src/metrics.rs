//! Regression quality metrics computed on the held-out partition.
use std::fmt;

use ndarray::ArrayView1;

use crate::error::{DeskError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
    /// Variance of the labels, i.e. the MSE of always predicting their mean.
    pub baseline_mse: f64,
}

impl RegressionMetrics {
    pub fn compute(labels: ArrayView1<f64>, predictions: ArrayView1<f64>) -> Result<Self> {
        if labels.len() != predictions.len() {
            return Err(DeskError::Computation(format!(
                "Found input variables with inconsistent numbers of samples: [{}, {}]",
                labels.len(),
                predictions.len()
            )));
        }
        if labels.is_empty() {
            return Err(DeskError::Computation(
                "metrics require at least one sample".to_string(),
            ));
        }

        let n = labels.len() as f64;
        let mut squared_error = 0.0;
        let mut absolute_error = 0.0;
        for (label, prediction) in labels.iter().zip(predictions.iter()) {
            let error = prediction - label;
            squared_error += error * error;
            absolute_error += error.abs();
        }

        let mean = labels.sum() / n;
        let total: f64 = labels.iter().map(|l| (l - mean) * (l - mean)).sum();

        let mse = squared_error / n;
        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            mae: absolute_error / n,
            r2: r2_from_sums(squared_error, total),
            baseline_mse: total / n,
        })
    }
}

// Constant labels: a perfect fit scores 1, anything else 0.
fn r2_from_sums(residual: f64, total: f64) -> f64 {
    if total == 0.0 {
        if residual == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - residual / total
    }
}

/// Boxed text summary of the metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSummary(pub RegressionMetrics);

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        let explained = format!("R² = {:.2}% of variance", m.r2 * 100.0);
        writeln!(f, "╔══════════════════════════════════════╗")?;
        writeln!(f, "║      MODEL PERFORMANCE METRICS       ║")?;
        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ Mean Squared Error:  {:>15.4} ║", m.mse)?;
        writeln!(f, "║ Root Mean Sq. Error: {:>15.4} ║", m.rmse)?;
        writeln!(f, "║ Mean Absolute Error: {:>15.4} ║", m.mae)?;
        writeln!(f, "║ R² Score:            {:>15.4} ║", m.r2)?;
        writeln!(f, "║ Baseline MSE (mean): {:>15.4} ║", m.baseline_mse)?;
        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ Interpretation:                      ║")?;
        writeln!(f, "║ • {:<34} ║", explained)?;
        writeln!(f, "║   explained by model                 ║")?;
        write!(f, "╚══════════════════════════════════════╝")
    }
}
