//! JSON export of a completed run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ClassificationMetrics, ConfusionMatrix, FittedModel, LabelEncoding, SolverConfig};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub airlogit_version: String,
    pub input_file: String,
    pub feature_column: String,
    pub target_column: String,
    pub test_size: f64,
    pub seed: u64,
    pub solver: SolverConfig,
}

/// Row counts through the pipeline
#[derive(Serialize)]
pub struct DataSummary {
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub label_encoding: LabelEncoding,
}

/// Complete export of one run
#[derive(Serialize)]
pub struct RunExport {
    pub metadata: RunMetadata,
    pub data: DataSummary,
    pub model: FittedModel,
    pub metrics: ClassificationMetrics,
    pub confusion_matrix: ConfusionMatrix,
}

/// Parameters for building a [`RunExport`]
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub feature_column: &'a str,
    pub target_column: &'a str,
    pub test_size: f64,
    pub seed: u64,
    pub solver: SolverConfig,
}

impl RunExport {
    pub fn new(
        params: &ExportParams<'_>,
        data: DataSummary,
        model: &FittedModel,
        metrics: ClassificationMetrics,
        confusion_matrix: &ConfusionMatrix,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                airlogit_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.to_string(),
                feature_column: params.feature_column.to_string(),
                target_column: params.target_column.to_string(),
                test_size: params.test_size,
                seed: params.seed,
                solver: params.solver,
            },
            data,
            model: model.clone(),
            metrics,
            confusion_matrix: confusion_matrix.clone(),
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_run(export: &RunExport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export).context("Failed to serialize run export")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(())
}
