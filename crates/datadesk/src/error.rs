use thiserror::Error;

use crate::math::Slot;

pub type Result<T> = std::result::Result<T, DeskError>;

/// Broad classification of a failure, used by front ends to decide how to
/// present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input, shape or column kind was missing before any
    /// computation started.
    Precondition,
    /// User-entered text could not be parsed.
    Parse,
    /// A numerical routine failed.
    Computation,
    /// Reading or writing a file failed.
    Io,
}

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Both matrices needed")]
    BothMatricesNeeded,

    #[error("Matrix {0} not loaded")]
    MatrixNotLoaded(Slot),

    #[error("{op}: {requirement} (A is {}x{}, B is {}x{})", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        requirement: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Matrix {slot} must be square, got {rows}x{cols}")]
    NotSquare { slot: Slot, rows: usize, cols: usize },

    #[error("Invalid format: {0}")]
    Parse(String),

    #[error("Load data first")]
    NoData,

    #[error("{0}")]
    MissingColumnKind(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Please load data first (Predefined, Custom or Synthetic)")]
    NoSamples,

    #[error("Please train the model first")]
    NotTrained,

    #[error(
        "Feature mismatch: model has {coefficients} coefficients but {features} feature names. Please train the model again."
    )]
    FeatureMismatch { coefficients: usize, features: usize },

    #[error("No chart to save")]
    NoChart,

    #[error("Unsupported chart format '{0}'")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Computation(String),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DeskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeskError::Parse(_) => ErrorKind::Parse,
            DeskError::Computation(_) => ErrorKind::Computation,
            DeskError::Csv(_) | DeskError::Io { .. } => ErrorKind::Io,
            _ => ErrorKind::Precondition,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DeskError::Io {
            context: context.into(),
            source,
        }
    }
}
