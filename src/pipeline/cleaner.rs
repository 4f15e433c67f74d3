//! Dataset cleaning: drop incomplete rows, coerce the feature, encode the label

use polars::prelude::*;

use super::encoder::{encode_binary_label, LabelEncoding};
use super::error::{PipelineError, Result};
use super::missing::drop_missing_rows;

/// Output of the cleaning stage
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    /// Complete rows only, feature as Float64, label as 0/1 Float64
    pub df: DataFrame,
    /// How the label categories map onto 0/1
    pub encoding: LabelEncoding,
    /// Rows removed because they held a missing value
    pub rows_dropped: usize,
}

/// Clean a loaded table for modeling.
///
/// Steps, in order:
/// 1. drop every row with a missing value in any column
/// 2. coerce `feature` to Float64
/// 3. replace `target` by its 0/1 indicator (first category dropped)
pub fn clean_dataset(df: &DataFrame, feature: &str, target: &str) -> Result<CleanedDataset> {
    let mut cleaned = drop_missing_rows(df)?;
    let rows_dropped = df.height() - cleaned.height();

    coerce_to_float(&mut cleaned, feature)?;
    let encoding = encode_binary_label(&mut cleaned, target)?;

    Ok(CleanedDataset {
        df: cleaned,
        encoding,
        rows_dropped,
    })
}

/// Cast `column` to Float64 in place.
///
/// Fails with [`PipelineError::Type`] if any non-null value is not numeric.
pub fn coerce_to_float(df: &mut DataFrame, column: &str) -> Result<()> {
    let col = df
        .column(column)
        .map_err(|_| PipelineError::MissingColumn {
            column: column.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })?;

    if col.dtype() == &DataType::Float64 {
        return Ok(());
    }

    let cast = col.cast(&DataType::Float64)?;

    // A non-strict cast turns unparseable values into nulls
    if cast.null_count() > col.null_count() {
        let originals = col.cast(&DataType::String)?;
        let failures: Vec<String> = originals
            .str()?
            .into_iter()
            .zip(cast.f64()?.into_iter())
            .filter_map(|(orig, parsed)| match (orig, parsed) {
                (Some(s), None) => Some(s.to_string()),
                _ => None,
            })
            .collect();

        return Err(PipelineError::Type {
            column: column.to_string(),
            count: failures.len(),
            example: failures.into_iter().next().unwrap_or_default(),
        });
    }

    df.with_column(cast)?;
    Ok(())
}

/// Column names paired with their inferred data types
pub fn column_types(df: &DataFrame) -> Vec<(String, String)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.dtype().to_string()))
        .collect()
}
