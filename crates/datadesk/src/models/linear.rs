use ndarray::{Array1, Array2, Axis};

use crate::error::{DeskError, Result};
use crate::math::linalg;
use crate::models::regressor_trait::RegressorModel;

/// Ordinary least squares with an intercept.
#[derive(Clone, Debug, Default)]
pub struct LinearRegression {
    fitted: Option<Fitted>,
}

#[derive(Clone, Debug)]
struct Fitted {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted coefficients, one per feature column.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.fitted.as_ref().map(|f| &f.coefficients)
    }

    pub fn intercept(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.intercept)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

impl RegressorModel for LinearRegression {
    /// Centres `x` and `y`, solves the centred system by SVD and recovers the
    /// intercept from the means. Rank-deficient input gets the minimum-norm
    /// solution.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(DeskError::Computation(format!(
                "Found input variables with inconsistent numbers of samples: [{}, {}]",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(DeskError::Computation(format!(
                "Found array with {} sample(s) and {} feature(s) while a minimum of 1 is required",
                x.nrows(),
                x.ncols()
            )));
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| DeskError::Computation("Cannot compute feature means".to_string()))?;
        let y_mean = y
            .mean()
            .ok_or_else(|| DeskError::Computation("Cannot compute target mean".to_string()))?;

        let x_centred = x - &x_mean;
        let y_centred = y - y_mean;
        let coefficients = linalg::lstsq(&x_centred, &y_centred)?;
        let intercept = y_mean - x_mean.dot(&coefficients);

        log::debug!(
            "Fitted OLS on {} samples x {} features, intercept {:.4}",
            x.nrows(),
            x.ncols(),
            intercept
        );
        self.fitted = Some(Fitted {
            coefficients,
            intercept,
        });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let fitted = self.fitted.as_ref().ok_or(DeskError::NotTrained)?;
        if x.ncols() != fitted.coefficients.len() {
            return Err(DeskError::Computation(format!(
                "X has {} features, but LinearRegression is expecting {} features as input",
                x.ncols(),
                fitted.coefficients.len()
            )));
        }
        Ok(x.dot(&fitted.coefficients) + fitted.intercept)
    }

    fn name(&self) -> &str {
        "LinearRegression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn recovers_exact_plane() {
        // y = 3 + 2*x0 - x1
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 3.0], [4.0, 1.0]];
        let y = x.map_axis(Axis(1), |r| 3.0 + 2.0 * r[0] - r[1]);
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients().unwrap();
        assert!((coef[0] - 2.0).abs() < 1e-9);
        assert!((coef[1] + 1.0).abs() < 1e-9);
        assert!((model.intercept().unwrap() - 3.0).abs() < 1e-9);

        let pred = model.predict(&array![[1.0, 1.0]]).unwrap();
        assert!((pred[0] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn predict_before_fit_is_not_trained() {
        let model = LinearRegression::new();
        let err = model.predict(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, DeskError::NotTrained));
    }

    #[test]
    fn fit_rejects_length_mismatch() {
        let mut model = LinearRegression::new();
        assert!(model.fit(&array![[1.0], [2.0]], &array![1.0]).is_err());
        assert!(!model.is_fitted());
    }
}
