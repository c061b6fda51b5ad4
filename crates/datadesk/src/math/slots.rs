use std::fmt;
use std::str::FromStr;

use crate::error::{DeskError, Result};
use crate::math::Matrix;

/// Names one of the two matrix holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "A"),
            Slot::B => write!(f, "B"),
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" => Ok(Slot::A),
            "b" => Ok(Slot::B),
            _ => Err(format!("Unknown matrix slot: {}. Expected 'a' or 'b'", s)),
        }
    }
}

/// The A/B operand pair. Every operation reads the slots and returns a new
/// value; only `set`, `swap` and `clear` mutate.
#[derive(Debug, Clone, Default)]
pub struct MatrixSlots {
    a: Option<Matrix>,
    b: Option<Matrix>,
}

impl MatrixSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&Matrix> {
        match slot {
            Slot::A => self.a.as_ref(),
            Slot::B => self.b.as_ref(),
        }
    }

    pub fn set(&mut self, slot: Slot, matrix: Matrix) {
        log::debug!("Matrix {} loaded with shape {:?}", slot, matrix.shape());
        match slot {
            Slot::A => self.a = Some(matrix),
            Slot::B => self.b = Some(matrix),
        }
    }

    pub fn add(&self) -> Result<Matrix> {
        let (a, b) = self.both()?;
        a.add(b)
    }

    pub fn subtract(&self) -> Result<Matrix> {
        let (a, b) = self.both()?;
        a.subtract(b)
    }

    pub fn multiply(&self) -> Result<Matrix> {
        let (a, b) = self.both()?;
        a.multiply(b)
    }

    pub fn transpose(&self, slot: Slot) -> Result<Matrix> {
        Ok(self.require(slot)?.transpose())
    }

    pub fn determinant(&self, slot: Slot) -> Result<f64> {
        self.require(slot)?.determinant(slot)
    }

    /// Exchange A and B, including when one or both are empty.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
    }

    pub fn clear(&mut self) {
        self.a = None;
        self.b = None;
    }

    /// One status line per slot: shape when loaded, "Not loaded" otherwise.
    pub fn status(&self, slot: Slot) -> String {
        match self.get(slot) {
            Some(m) => format!("Matrix {}: {}x{}", slot, m.nrows(), m.ncols()),
            None => format!("Matrix {}: Not loaded", slot),
        }
    }

    fn require(&self, slot: Slot) -> Result<&Matrix> {
        self.get(slot).ok_or(DeskError::MatrixNotLoaded(slot))
    }

    fn both(&self) -> Result<(&Matrix, &Matrix)> {
        match (&self.a, &self.b) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(DeskError::BothMatricesNeeded),
        }
    }
}
