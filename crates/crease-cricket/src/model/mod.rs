// Classifiers over encoded feature rows.
//
// Models see only numeric rows (integer codes and the target), never team or
// venue names. Fitting runs on linfa; these wrappers keep the row-slice API
// and the persisted shape.

pub mod forest;
pub mod logistic;

use ndarray::Array2;
use thiserror::Error;

pub use forest::RandomForest;
pub use logistic::LogisticRegression;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("expected {expected} features per row, got {got}")]
    FeatureWidth { expected: usize, got: usize },

    #[error("non-finite feature value in row {row}")]
    NonFinite { row: usize },

    #[error("training labels contain a single class; need at least two")]
    SingleClass,

    #[error("model fitting failed: {0}")]
    Fit(String),

    #[error("model produced an unusable prediction: {0}")]
    Prediction(String),
}

/// Shared shape checks for `fit`. Returns the row width.
pub(crate) fn check_training_set<L>(x: &[Vec<f64>], y: &[L]) -> Result<usize, ModelError> {
    if x.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }
    if x.len() != y.len() {
        return Err(ModelError::LengthMismatch {
            features: x.len(),
            labels: y.len(),
        });
    }
    let width = x[0].len();
    if width == 0 {
        return Err(ModelError::FeatureWidth { expected: 1, got: 0 });
    }
    for (i, row) in x.iter().enumerate() {
        if row.len() != width {
            return Err(ModelError::FeatureWidth {
                expected: width,
                got: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { row: i });
        }
    }
    Ok(width)
}

pub(crate) fn check_row(row: &[f64], width: usize) -> Result<(), ModelError> {
    if row.len() != width {
        return Err(ModelError::FeatureWidth {
            expected: width,
            got: row.len(),
        });
    }
    if row.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite { row: 0 });
    }
    Ok(())
}

/// Rows as an `n x width` matrix. Widths are already checked.
pub(crate) fn to_matrix(x: &[Vec<f64>], width: usize) -> Result<Array2<f64>, ModelError> {
    let flat: Vec<f64> = x.iter().flatten().copied().collect();
    Array2::from_shape_vec((x.len(), width), flat).map_err(|e| ModelError::Fit(e.to_string()))
}

/// A single row as a `1 x width` matrix.
pub(crate) fn row_matrix(row: &[f64]) -> Result<Array2<f64>, ModelError> {
    Array2::from_shape_vec((1, row.len()), row.to_vec())
        .map_err(|e| ModelError::Prediction(e.to_string()))
}
