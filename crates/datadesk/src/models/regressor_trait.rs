use ndarray::{Array1, Array2};

use crate::error::Result;

/// Contract for regression models trained by the regression session.
pub trait RegressorModel {
    /// Fit the model on rows of `x` with continuous targets `y`.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one value per row of `x`. Fails when the model is unfitted or
    /// the feature count differs from training.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "regressor"
    }
}
