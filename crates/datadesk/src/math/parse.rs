use crate::error::{DeskError, Result};
use crate::math::Matrix;

/// The raw text of the matrix entry form: row count, column count and one
/// line of values per row.
#[derive(Debug, Clone, Default)]
pub struct MatrixForm {
    pub rows: String,
    pub cols: String,
    pub body: String,
}

impl MatrixForm {
    pub fn new(rows: impl Into<String>, cols: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            rows: rows.into(),
            cols: cols.into(),
            body: body.into(),
        }
    }

    /// Parse the form into an R x C matrix.
    ///
    /// Values are separated by whitespace and/or commas. Blank lines are
    /// skipped. The number of non-blank lines must equal the row count and
    /// every line must hold exactly the column count of values.
    pub fn parse(&self) -> Result<Matrix> {
        let (rows, cols) = parse_dimensions(&self.rows, &self.cols)?;

        let mut elements = Vec::new();
        for line in self.body.lines().filter(|l| !l.trim().is_empty()) {
            elements.push(parse_row(line)?);
        }

        if elements.len() != rows {
            return Err(DeskError::Parse(format!(
                "Expected {} rows, got {}",
                rows,
                elements.len()
            )));
        }
        if elements.iter().any(|row| row.len() != cols) {
            return Err(DeskError::Parse(format!(
                "Each row must have {} columns",
                cols
            )));
        }

        Matrix::from_rows(elements)
    }
}

/// Parse the row and column counts of the entry form. Both must be positive
/// integers.
pub fn parse_dimensions(rows: &str, cols: &str) -> Result<(usize, usize)> {
    let rows = parse_count(rows, "Rows")?;
    let cols = parse_count(cols, "Columns")?;
    Ok((rows, cols))
}

/// Largest row or column count the entry form accepts.
pub const MAX_DIMENSION: usize = 1000;

fn parse_count(text: &str, what: &str) -> Result<usize> {
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| DeskError::Parse(format!("{} must be an integer, got '{}'", what, text.trim())))?;
    if value <= 0 {
        return Err(DeskError::Parse(
            "Rows and Columns must be positive".to_string(),
        ));
    }
    if value > MAX_DIMENSION as i64 {
        return Err(DeskError::Parse(format!(
            "{} must be at most {}, got {}",
            what, MAX_DIMENSION, value
        )));
    }
    Ok(value as usize)
}

fn parse_row(line: &str) -> Result<Vec<f64>> {
    line.replace(',', " ")
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| DeskError::Parse(format!("could not convert '{}' to a number", token)))
        })
        .collect()
}
