//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{SolverConfig, DEFAULT_SEED, DEFAULT_TEST_SIZE};

/// Airlogit - Predict passenger satisfaction from a single survey rating with logistic regression
#[derive(Parser, Debug)]
#[command(name = "airlogit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "Invistico_Airline.csv")]
    pub input: PathBuf,

    /// Numeric feature column used as the single predictor
    #[arg(short, long, default_value = "Inflight entertainment")]
    pub feature: String,

    /// Two-level label column; its first category in sort order encodes to 0
    #[arg(short, long, default_value = "satisfaction")]
    pub target: String,

    /// Fraction of rows held out for evaluation (0.0 to 1.0, exclusive)
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE, value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Inverse L2 regularization strength (C). Smaller values regularize more.
    #[arg(long, default_value = "1.0", value_parser = validate_positive)]
    pub regularization: f64,

    /// Maximum solver iterations before reporting non-convergence
    #[arg(long, default_value = "100")]
    pub max_iter: usize,

    /// Solver gradient tolerance
    #[arg(long, default_value = "0.0001", value_parser = validate_positive)]
    pub tol: f64,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Rows of the cleaned table to preview
    #[arg(long, default_value = "10")]
    pub preview_rows: usize,

    /// Skip the regression curve and confusion matrix plots
    #[arg(long, default_value = "false")]
    pub no_plots: bool,

    /// Write model parameters and metrics to this JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Solver settings assembled from the flags
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            c: self.regularization,
            max_iter: self.max_iter,
            tol: self.tol,
        }
    }
}

/// Validator for test_size parameter
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_size must be between 0.0 and 1.0 (exclusive), got {}",
            value
        ))
    }
}

/// Validator for strictly positive parameters
fn validate_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("value must be a positive number, got {}", value))
    }
}
