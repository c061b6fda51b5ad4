//! Bridges between the crate's `ndarray` storage and `nalgebra`'s
//! decompositions.
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::error::{DeskError, Result};

/// Singular values below this are treated as zero by the least-squares solve.
const SVD_EPS: f64 = 1e-10;

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |r, c| a[(r, c)])
}

/// Determinant via LU decomposition with partial pivoting.
pub fn determinant(a: &Array2<f64>) -> Result<f64> {
    if a.nrows() != a.ncols() {
        return Err(DeskError::Computation(format!(
            "determinant requires a square matrix, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    let det = to_dmatrix(a).determinant();
    if !det.is_finite() {
        return Err(DeskError::Computation(format!(
            "determinant is not finite ({})",
            det
        )));
    }
    Ok(det)
}

/// Minimum-norm least-squares solution of `x · beta ≈ y`.
pub fn lstsq(x: &Array2<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
    if x.nrows() != y.len() {
        return Err(DeskError::Computation(format!(
            "Found input variables with inconsistent numbers of samples: [{}, {}]",
            x.nrows(),
            y.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(DeskError::Computation(
            "Input contains NaN or infinity".to_string(),
        ));
    }

    let b = DVector::from_iterator(y.len(), y.iter().copied());
    let svd = to_dmatrix(x).svd(true, true);
    let beta = svd
        .solve(&b, SVD_EPS)
        .map_err(|e| DeskError::Computation(format!("Least squares solution failed: {}", e)))?;

    Ok(beta.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn determinant_of_triangular_is_diagonal_product() {
        let a = array![[2.0, 1.0, 0.0], [0.0, 3.0, 5.0], [0.0, 0.0, 4.0]];
        assert!((determinant(&a).unwrap() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn overflowing_determinant_is_a_computation_error() {
        let a = array![[1e200, 0.0], [0.0, 1e200]];
        let err = determinant(&a).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Computation);
        assert!(err.to_string().contains("not finite"), "{}", err);
    }

    #[test]
    fn lstsq_recovers_exact_solution() {
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let y = array![2.0, -1.0, 1.0];
        let beta = lstsq(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-9);
        assert!((beta[1] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn lstsq_rejects_nan() {
        let x = array![[1.0], [f64::NAN]];
        let y = array![1.0, 2.0];
        assert!(lstsq(&x, &y).is_err());
    }
}
