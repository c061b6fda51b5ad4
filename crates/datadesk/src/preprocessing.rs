//! Feature standardization for the regression pipeline.
//!
//! Provides a `StandardScaler` storing per-column mean and population
//! standard deviation. It is fit on the training partition only and then
//! applied to every partition.

use ndarray::{Array1, Array2, Axis};

use crate::error::{DeskError, Result};

/// Per-column mean/std standardizer.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardScaler {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl StandardScaler {
    /// Fit a scaler from an `Array2<f64>` where rows are samples and
    /// columns are features. Columns with zero variance get a std of 1 so
    /// they are only centred.
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        let (nrows, ncols) = x.dim();
        if nrows == 0 || ncols == 0 {
            return Err(DeskError::Computation(format!(
                "Cannot fit a scaler on an empty {}x{} matrix",
                nrows, ncols
            )));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| DeskError::Computation("Cannot compute column means".to_string()))?;
        let std = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 || !s.is_finite() { 1.0 } else { s });

        Ok(Self { mean, std })
    }

    /// Standardize every row with the fitted statistics.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.mean.len() {
            return Err(DeskError::Computation(format!(
                "X has {} features, but the scaler is expecting {} features as input",
                x.ncols(),
                self.mean.len()
            )));
        }
        Ok((x - &self.mean) / &self.std)
    }

    pub fn fit_transform(x: &Array2<f64>) -> Result<(Self, Array2<f64>)> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scaled_columns_have_zero_mean_unit_std() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let (_, scaled) = StandardScaler::fit_transform(&x).unwrap();
        for col in scaled.columns() {
            assert!(col.mean().unwrap().abs() < 1e-12);
            assert!((col.std(0.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_is_only_centred() {
        let x = array![[5.0, 1.0], [5.0, 2.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(scaler.std[0], 1.0);
        let scaled = scaler.transform(&x).unwrap();
        assert_eq!(scaled[(0, 0)], 0.0);
    }

    #[test]
    fn transform_rejects_wrong_width() {
        let scaler = StandardScaler::fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(scaler.transform(&array![[1.0], [2.0]]).is_err());
    }
}
