//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

pub const FEATURE: &str = "Inflight entertainment";
pub const TARGET: &str = "satisfaction";

const HEADER: &str = "satisfaction,Gender,Customer Type,Age,Class,Flight Distance,Inflight entertainment,Departure Delay in Minutes,Arrival Delay in Minutes";

/// Survey rows as CSV text, shaped like the airline dataset.
///
/// Ratings 4-5 are mostly "satisfied", 0-2 mostly "dissatisfied", with a
/// few exceptions so the classes overlap. Every 9th row misses its arrival
/// delay, so `rows / 9` rows (rounded up) are incomplete.
pub fn survey_csv(rows: usize) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for i in 0..rows {
        let rating = i % 6;
        let satisfied = match rating {
            4 | 5 => i % 11 != 0,
            3 => i % 2 == 0,
            _ => i % 13 == 0,
        };
        let label = if satisfied { "satisfied" } else { "dissatisfied" };
        let gender = if i % 2 == 0 { "Female" } else { "Male" };
        let class = ["Eco", "Business", "Eco Plus"][i % 3];
        let arrival = if i % 9 == 0 {
            String::new()
        } else {
            (i % 17).to_string()
        };

        out.push_str(&format!(
            "{},{},Loyal Customer,{},{},{},{},{},{}\n",
            label,
            gender,
            20 + i % 50,
            class,
            300 + 37 * i,
            rating,
            i % 23,
            arrival
        ));
    }

    out
}

/// Write raw CSV text into a fresh temp directory
pub fn write_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    (temp_dir, csv_path)
}

/// Write a generated survey of `rows` rows to a temp CSV
pub fn create_survey_csv(rows: usize) -> (TempDir, PathBuf) {
    write_temp_csv(&survey_csv(rows))
}

/// Write a DataFrame to a temp Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("survey.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Float values of a column, panicking on nulls
pub fn f64_values(df: &DataFrame, column: &str) -> Vec<f64> {
    df.column(column)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("unexpected null"))
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}
