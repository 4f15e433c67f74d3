//! Binary label encoding
//!
//! Collapses a two-level categorical label into a single 0/1 indicator,
//! one-hot style with the first category dropped.

use polars::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, Result};

/// Mapping between the two label categories and the 0/1 indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEncoding {
    /// First category in sort order; dropped by the one-hot step, encodes to 0
    pub negative: String,
    /// Remaining category; encodes to 1
    pub positive: String,
}

impl LabelEncoding {
    /// Fit the encoding on the distinct values of `column`.
    ///
    /// Numeric columns order their categories by value, everything else
    /// lexicographically. Exactly two non-null categories are required.
    pub fn fit(df: &DataFrame, column: &str) -> Result<Self> {
        let col = get_column(df, column)?;
        let categories = sorted_categories(col)?;

        if categories.len() != 2 {
            return Err(PipelineError::Label {
                column: column.to_string(),
                found: categories.len(),
                categories,
            });
        }

        let mut iter = categories.into_iter();
        let negative = iter.next().unwrap_or_default();
        let positive = iter.next().unwrap_or_default();

        Ok(Self { negative, positive })
    }

    /// Encode a single rendered value; `None` for unknown or missing values
    pub fn encode_value(&self, value: Option<&str>) -> Option<f64> {
        match value {
            Some(v) if v == self.positive => Some(1.0),
            Some(v) if v == self.negative => Some(0.0),
            _ => None,
        }
    }
}

/// Replace `column` in place by its 0/1 indicator.
///
/// Returns the encoding used. Fails if the column is not two-level or still
/// holds missing values.
pub fn encode_binary_label(df: &mut DataFrame, column: &str) -> Result<LabelEncoding> {
    let encoding = LabelEncoding::fit(df, column)?;
    let values = column_to_string_vec(get_column(df, column)?)?;

    let mut encoded: Vec<f64> = Vec::with_capacity(values.len());
    for value in &values {
        match encoding.encode_value(value.as_deref()) {
            Some(v) => encoded.push(v),
            None => {
                return Err(PipelineError::Label {
                    column: column.to_string(),
                    found: 3,
                    categories: vec![
                        encoding.negative.clone(),
                        encoding.positive.clone(),
                        value.clone().unwrap_or_else(|| "null".to_string()),
                    ],
                })
            }
        }
    }

    df.with_column(Column::new(column.into(), encoded))?;

    Ok(encoding)
}

/// Count rows per label value, with missing values under `None`.
///
/// Sorted by count descending, ties broken by value.
pub fn label_value_counts(df: &DataFrame, column: &str) -> Result<Vec<(Option<String>, usize)>> {
    let values = column_to_string_vec(get_column(df, column)?)?;

    let mut counts: Vec<(Option<String>, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts)
}

fn get_column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column> {
    df.column(column).map_err(|_| PipelineError::MissingColumn {
        column: column.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}

/// Distinct non-null values rendered as strings, in category order
fn sorted_categories(col: &Column) -> Result<Vec<String>> {
    let unique = col.unique()?;

    if unique.dtype().is_primitive_numeric() {
        let cast = unique.cast(&DataType::Float64)?;
        let mut values: Vec<f64> = cast.f64()?.into_iter().flatten().collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        return Ok(values.into_iter().map(render_number).collect());
    }

    let mut values: Vec<String> = column_to_string_vec(&unique)?
        .into_iter()
        .flatten()
        .collect();
    values.sort();
    Ok(values)
}

/// Convert a column to a Vec of Option<String> for comparison
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        dtype if dtype.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(render_number))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Integral floats render without a fractional part, so `1` and `1.0` agree
fn render_number(n: f64) -> String {
    format!("{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_string_labels_sorted() {
        let df = df! {
            "satisfaction" => ["satisfied", "dissatisfied", "satisfied"],
        }
        .unwrap();

        let encoding = LabelEncoding::fit(&df, "satisfaction").unwrap();
        assert_eq!(encoding.negative, "dissatisfied");
        assert_eq!(encoding.positive, "satisfied");
    }

    #[test]
    fn test_fit_numeric_labels_by_value() {
        let df = df! {
            "target" => [10i32, 2, 10, 2],
        }
        .unwrap();

        // Lexicographic order would put "10" first
        let encoding = LabelEncoding::fit(&df, "target").unwrap();
        assert_eq!(encoding.negative, "2");
        assert_eq!(encoding.positive, "10");
    }

    #[test]
    fn test_encode_in_place() {
        let mut df = df! {
            "satisfaction" => ["satisfied", "dissatisfied", "satisfied", "dissatisfied"],
            "feature" => [1.0f64, 2.0, 3.0, 4.0],
        }
        .unwrap();

        encode_binary_label(&mut df, "satisfaction").unwrap();

        let col = df.column("satisfaction").unwrap();
        assert_eq!(col.dtype(), &DataType::Float64);
        let values: Vec<f64> = col.f64().unwrap().into_iter().flatten().collect();
        assert_eq!(values, vec![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(df.get_column_names()[0].as_str(), "satisfaction");
    }

    #[test]
    fn test_encode_already_binary_is_stable() {
        let mut df = df! {
            "target" => [0.0f64, 1.0, 1.0, 0.0],
        }
        .unwrap();

        encode_binary_label(&mut df, "target").unwrap();

        let values: Vec<f64> = df
            .column("target")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(values, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_three_categories_rejected() {
        let mut df = df! {
            "target" => ["good", "bad", "unknown"],
        }
        .unwrap();

        let err = encode_binary_label(&mut df, "target").unwrap_err();
        assert!(matches!(err, PipelineError::Label { found: 3, .. }));
    }

    #[test]
    fn test_single_category_rejected() {
        let df = df! {
            "target" => ["good", "good"],
        }
        .unwrap();

        let err = LabelEncoding::fit(&df, "target").unwrap_err();
        assert!(matches!(err, PipelineError::Label { found: 1, .. }));
    }

    #[test]
    fn test_value_counts_with_nulls() {
        let df = df! {
            "target" => [Some("a"), Some("b"), None, Some("a"), Some("a")],
        }
        .unwrap();

        let counts = label_value_counts(&df, "target").unwrap();
        assert_eq!(
            counts,
            vec![
                (Some("a".to_string()), 3),
                (None, 1),
                (Some("b".to_string()), 1),
            ]
        );
    }
}
