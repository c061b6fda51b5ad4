//! Matrix arithmetic for the two-slot matrix store.
//!
//! `Matrix` wraps an `ndarray::Array2<f64>` and enforces a non-empty shape;
//! determinants and least squares go through `nalgebra` in `linalg`.
//! `MatrixSlots` holds the A and B operands the arithmetic actions read.
pub mod linalg;
pub mod matrix;
pub mod parse;
pub mod slots;

pub use matrix::Matrix;
pub use parse::MatrixForm;
pub use slots::{MatrixSlots, Slot};
