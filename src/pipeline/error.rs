//! Error types for the analysis pipeline.
//!
//! Each variant maps to a failure mode of one pipeline stage. The binary
//! wraps these in `anyhow` context naming the stage that failed.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading, cleaning, splitting or fitting.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file is absent or unreadable.
    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header or row structure of the input file is malformed.
    #[error("Failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// File extension is not one the loader understands.
    #[error("Unsupported file format: {0}. Supported formats: csv, parquet")]
    UnsupportedFormat(String),

    /// A required column is not present in the table.
    #[error("Column '{column}' not found in dataset. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A column could not be coerced to a numeric type.
    #[error("Column '{column}' contains {count} non-numeric value(s), e.g. {example:?}")]
    Type {
        column: String,
        count: usize,
        example: String,
    },

    /// The label column does not have exactly two categories.
    #[error("Label column '{column}' must have exactly 2 categories, found {found}: {categories:?}")]
    Label {
        column: String,
        found: usize,
        categories: Vec<String>,
    },

    /// Invalid train/test split request.
    #[error("Invalid train/test split: {0}")]
    Split(String),

    /// Feature matrix and label vector disagree, or are empty.
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// Training labels contain a single class.
    #[error("Training labels contain only class {0}; need both 0 and 1")]
    SingleClass(f64),

    /// Optimizer stopped (budget spent or no further descent) above the gradient tolerance.
    #[error("Solver did not converge after {iterations} iterations (gradient norm {gradient_norm:.3e} > tol {tol:.1e})")]
    Convergence {
        iterations: usize,
        gradient_norm: f64,
        tol: f64,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
