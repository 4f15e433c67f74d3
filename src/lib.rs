//! Airlogit: Logistic Regression Library
//!
//! Loads airline passenger survey data, cleans it, encodes the binary
//! satisfaction label, and fits a one-feature logistic regression.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
