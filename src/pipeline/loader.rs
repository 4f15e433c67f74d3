//! Dataset loader for CSV and Parquet files

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use super::error::{PipelineError, Result};

/// CSV cell contents read as missing, in addition to empty fields
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Shape and memory footprint of a loaded dataset
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    pub rows: usize,
    pub columns: usize,
    pub memory_mb: f64,
}

impl DatasetStats {
    pub fn of(df: &DataFrame) -> Self {
        let (rows, columns) = df.shape();
        Self {
            rows,
            columns,
            memory_mb: df.estimated_size() as f64 / (1024.0 * 1024.0),
        }
    }
}

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// CSV column types are inferred from the first `infer_schema_length` rows;
/// `0` scans the whole file. Empty CSV fields and any of [`MISSING_MARKERS`]
/// load as nulls.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = file_extension(path);
    if extension != "csv" && extension != "parquet" {
        return Err(PipelineError::UnsupportedFormat(extension));
    }

    // Missing/unreadable files are I/O errors, not parse errors
    File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let lf = scan(path, &extension, infer_schema_length)?;
    lf.collect().map_err(|e| parse_error(path, e))
}

/// Read only the column names from a dataset's schema
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let extension = file_extension(path);
    if extension != "csv" && extension != "parquet" {
        return Err(PipelineError::UnsupportedFormat(extension));
    }

    File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lf = scan(path, &extension, 100)?;
    let schema = lf.collect_schema().map_err(|e| parse_error(path, e))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Fail if any of `columns` is absent from the DataFrame
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for column in columns {
        if !available.iter().any(|name| name == column) {
            return Err(PipelineError::MissingColumn {
                column: column.to_string(),
                available,
            });
        }
    }

    Ok(())
}

fn scan(path: &Path, extension: &str, infer_schema_length: usize) -> Result<LazyFrame> {
    let lf = match extension {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(schema_length)
                .with_null_values(Some(NullValues::AllColumns(
                    MISSING_MARKERS.iter().map(|m| (*m).into()).collect(),
                )))
                .finish()
        }
        _ => LazyFrame::scan_parquet(path, Default::default()),
    };

    lf.map_err(|e| parse_error(path, e))
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn parse_error(path: &Path, err: PolarsError) -> PipelineError {
    PipelineError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_present() {
        let df = df! {
            "Inflight entertainment" => [1i64, 2, 3],
            "satisfaction" => ["satisfied", "dissatisfied", "satisfied"],
        }
        .unwrap();

        assert!(require_columns(&df, &["Inflight entertainment", "satisfaction"]).is_ok());
    }

    #[test]
    fn test_require_columns_missing() {
        let df = df! {
            "a" => [1i64, 2, 3],
        }
        .unwrap();

        let err = require_columns(&df, &["a", "satisfaction"]).unwrap_err();
        match err {
            PipelineError::MissingColumn { column, available } => {
                assert_eq!(column, "satisfaction");
                assert_eq!(available, vec!["a".to_string()]);
            }
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_stats_shape() {
        let df = df! {
            "x" => [1.0f64, 2.0],
            "y" => [0i32, 1],
        }
        .unwrap();

        let stats = DatasetStats::of(&df);
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.columns, 2);
        assert!(stats.memory_mb >= 0.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_dataset(Path::new("survey.xlsx"), 100);
        assert!(matches!(result, Err(PipelineError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }
}
