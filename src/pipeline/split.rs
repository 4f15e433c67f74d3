//! Feature projection and seeded train/test splitting

use faer::Mat;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::{PipelineError, Result};

/// Default fraction of rows held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.30;

/// Default seed for the shuffling generator
pub const DEFAULT_SEED: u64 = 42;

/// Feature matrix (rows x features) and its 0/1 labels
#[derive(Debug, Clone)]
pub struct LabeledData {
    pub feature_names: Vec<String>,
    pub features: Mat<f64>,
    pub labels: Vec<f64>,
}

impl LabeledData {
    pub fn new(feature_names: Vec<String>, features: Mat<f64>, labels: Vec<f64>) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(PipelineError::Shape(format!(
                "{} feature rows but {} labels",
                features.nrows(),
                labels.len()
            )));
        }
        if features.ncols() != feature_names.len() {
            return Err(PipelineError::Shape(format!(
                "{} feature columns but {} feature names",
                features.ncols(),
                feature_names.len()
            )));
        }

        Ok(Self {
            feature_names,
            features,
            labels,
        })
    }

    /// Build from a single feature column and its labels
    pub fn from_single_feature(name: &str, feature: &[f64], labels: &[f64]) -> Result<Self> {
        let features = Mat::from_fn(feature.len(), 1, |i, _| feature[i]);
        Self::new(vec![name.to_string()], features, labels.to_vec())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Values of one feature column
    pub fn feature_column(&self, index: usize) -> Vec<f64> {
        (0..self.features.nrows())
            .map(|row| self.features[(row, index)])
            .collect()
    }

    /// Gather the given rows, in the given order
    fn select_rows(&self, indices: &[usize]) -> (Mat<f64>, Vec<f64>) {
        let x = Mat::from_fn(indices.len(), self.features.ncols(), |i, j| {
            self.features[(indices[i], j)]
        });
        let y = indices.iter().map(|&i| self.labels[i]).collect();
        (x, y)
    }
}

/// Train and holdout partitions of a [`LabeledData`]
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Mat<f64>,
    pub x_test: Mat<f64>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
    /// Source row of each training sample
    pub train_indices: Vec<usize>,
    /// Source row of each holdout sample
    pub test_indices: Vec<usize>,
}

/// Project a cleaned table onto the feature columns and the label column.
///
/// All projected columns must already be Float64 without nulls.
pub fn extract_features(df: &DataFrame, features: &[&str], target: &str) -> Result<LabeledData> {
    let columns: Vec<Vec<f64>> = features
        .iter()
        .map(|name| float_values(df, name))
        .collect::<Result<_>>()?;
    let labels = float_values(df, target)?;

    let x = Mat::from_fn(df.height(), features.len(), |i, j| columns[j][i]);
    let names = features.iter().map(|s| s.to_string()).collect();

    LabeledData::new(names, x, labels)
}

fn float_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let col = df.column(column).map_err(|_| PipelineError::MissingColumn {
        column: column.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })?;

    let cast = col.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = cast.f64()?.into_iter().collect();
    let count = values.iter().filter(|v| v.is_none()).count();

    if count > 0 {
        return Err(PipelineError::Type {
            column: column.to_string(),
            count,
            example: "null".to_string(),
        });
    }

    Ok(values.into_iter().flatten().collect())
}

/// Number of (train, test) rows for `n_samples` at `test_size`.
///
/// The holdout size rounds up, the training set takes the rest.
pub fn split_sizes(n_samples: usize, test_size: f64) -> Result<(usize, usize)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::Split(format!(
            "test_size must be between 0 and 1, got {test_size}"
        )));
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(PipelineError::Split(format!(
            "split would leave an empty side (n_train={n_train}, n_test={n_test})"
        )));
    }

    Ok((n_train, n_test))
}

/// Shuffle row indices with a seeded generator
pub fn shuffle_indices(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Randomly partition rows into training and holdout sets.
///
/// The first `n_train` shuffled indices become the training set, the rest
/// the holdout set. The result depends only on the seed and input order.
pub fn train_test_split(data: &LabeledData, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    let (n_train, _) = split_sizes(data.len(), test_size)?;

    let indices = shuffle_indices(data.len(), seed);
    let train_indices = indices[..n_train].to_vec();
    let test_indices = indices[n_train..].to_vec();

    let (x_train, y_train) = data.select_rows(&train_indices);
    let (x_test, y_test) = data.select_rows(&test_indices);

    Ok(TrainTestSplit {
        x_train,
        x_test,
        y_train,
        y_test,
        train_indices,
        test_indices,
    })
}
