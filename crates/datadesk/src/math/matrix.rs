use std::fmt;

use ndarray::Array2;

use crate::error::{DeskError, Result};
use crate::math::linalg;
use crate::math::Slot;

/// A dense numeric grid with at least one row and one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Build a matrix from row-major values.
    pub fn from_shape_vec(shape: (usize, usize), values: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(DeskError::Parse(
                "Rows and Columns must be positive".to_string(),
            ));
        }
        let data = Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| DeskError::Parse(e.to_string()))?;
        Ok(Self { data })
    }

    /// Build a matrix from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().position(|r| r.len() != ncols) {
            return Err(DeskError::Parse(format!(
                "row {} has {} values, expected {}",
                bad + 1,
                rows[bad].len(),
                ncols
            )));
        }
        Self::from_shape_vec((nrows, ncols), rows.into_iter().flatten().collect())
    }

    pub fn identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(DeskError::Parse("identity size must be positive".to_string()));
        }
        Ok(Self {
            data: Array2::eye(n),
        })
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.require_same_shape(other, "Add")?;
        Ok(Matrix {
            data: &self.data + &other.data,
        })
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.require_same_shape(other, "Subtract")?;
        Ok(Matrix {
            data: &self.data - &other.data,
        })
    }

    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncols() != other.nrows() {
            return Err(DeskError::DimensionMismatch {
                op: "Multiply",
                requirement: "Column of A must equal row of B",
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Matrix {
            data: self.data.dot(&other.data),
        })
    }

    pub fn transpose(&self) -> Matrix {
        Matrix {
            data: self.data.t().to_owned(),
        }
    }

    /// Determinant of a square matrix. `slot` only names the operand in errors.
    pub fn determinant(&self, slot: Slot) -> Result<f64> {
        if !self.is_square() {
            return Err(DeskError::NotSquare {
                slot,
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        linalg::determinant(&self.data)
    }

    /// Element-wise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    fn require_same_shape(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(DeskError::DimensionMismatch {
                op,
                requirement: "Same dimensions required",
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.data.iter().map(|v| format_value(*v)).collect();
        let width = cells.iter().map(String::len).max().unwrap_or(1);
        let ncols = self.ncols();

        write!(f, "[")?;
        for (row, chunk) in cells.chunks(ncols).enumerate() {
            if row > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (col, cell) in chunk.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", cell, width = width)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

fn format_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else if v.is_finite() && (v.abs() >= 1e6 || v.abs() < 1e-4) && v != 0.0 {
        format!("{:.4e}", v)
    } else if v.is_finite() {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        v.to_string()
    }
}
