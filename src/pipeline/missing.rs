//! Missing value analysis and row removal

use polars::prelude::*;
use serde::Serialize;

use super::error::Result;

/// Null count for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub nulls: usize,
    pub ratio: f64,
}

/// Count missing values per column.
///
/// Sorted by null count descending; columns with equal counts keep
/// their table order.
pub fn analyze_missing_values(df: &DataFrame) -> Vec<MissingCount> {
    let height = df.height();

    let mut counts: Vec<MissingCount> = df
        .get_columns()
        .iter()
        .map(|col| {
            let nulls = col.null_count();
            MissingCount {
                column: col.name().to_string(),
                nulls,
                ratio: if height == 0 {
                    0.0
                } else {
                    nulls as f64 / height as f64
                },
            }
        })
        .collect();

    counts.sort_by(|a, b| b.nulls.cmp(&a.nulls));
    counts
}

/// Total number of missing cells across all columns
pub fn total_missing(counts: &[MissingCount]) -> usize {
    counts.iter().map(|c| c.nulls).sum()
}

/// Drop every row with at least one missing value in any column.
///
/// Float NaN counts as missing. Surviving rows keep their relative order
/// and are reindexed from zero.
pub fn drop_missing_rows(df: &DataFrame) -> Result<DataFrame> {
    Ok(nan_to_null(df)?.drop_nulls::<String>(None)?)
}

/// Replace NaN with null in every float column
pub fn nan_to_null(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    for col in df.get_columns() {
        let name = col.name().clone();
        let replaced = match col.dtype() {
            DataType::Float64 => col
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect::<Float64Chunked>()
                .with_name(name)
                .into_series(),
            DataType::Float32 => col
                .f32()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect::<Float32Chunked>()
                .with_name(name)
                .into_series(),
            _ => continue,
        };
        out.with_column(replaced)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_counts_and_order() {
        let df = df! {
            "complete" => [1.0f64, 2.0, 3.0, 4.0],
            "one_missing" => [Some(1.0f64), None, Some(3.0), Some(4.0)],
            "two_missing" => [None::<&str>, Some("b"), None, Some("d")],
        }
        .unwrap();

        let counts = analyze_missing_values(&df);

        assert_eq!(counts[0].column, "two_missing");
        assert_eq!(counts[0].nulls, 2);
        assert!((counts[0].ratio - 0.5).abs() < 1e-12);
        assert_eq!(counts[1].column, "one_missing");
        assert_eq!(counts[2].column, "complete");
        assert_eq!(counts[2].nulls, 0);
        assert_eq!(total_missing(&counts), 3);
    }

    #[test]
    fn test_analyze_empty_frame() {
        let df = df! {
            "a" => Vec::<f64>::new(),
        }
        .unwrap();

        let counts = analyze_missing_values(&df);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].ratio, 0.0);
    }

    #[test]
    fn test_drop_rows_preserves_order() {
        let df = df! {
            "id" => [1i32, 2, 3, 4, 5],
            "x" => [Some(1.0f64), None, Some(3.0), Some(4.0), Some(5.0)],
            "label" => [Some("a"), Some("b"), Some("a"), None, Some("b")],
        }
        .unwrap();

        let cleaned = drop_missing_rows(&df).unwrap();

        assert_eq!(cleaned.height(), 3);
        let ids: Vec<i32> = cleaned
            .column("id")
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let df = df! {
            "id" => [1i32, 2, 3, 4],
            "x" => [1.0f64, f64::NAN, 3.0, 4.0],
            "y" => [Some(0.5f32), Some(0.5), Some(f32::NAN), None],
        }
        .unwrap();

        let nulled = nan_to_null(&df).unwrap();
        assert_eq!(nulled.column("x").unwrap().null_count(), 1);
        assert_eq!(nulled.column("y").unwrap().null_count(), 2);
        assert_eq!(nulled.column("x").unwrap().dtype(), &DataType::Float64);

        let cleaned = drop_missing_rows(&df).unwrap();
        let ids: Vec<i32> = cleaned
            .column("id")
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(ids, vec![1]);
    }
}
