// L2-regularised binary logistic regression for the chase model.
//
// Fitted by linfa-logistic with `alpha = 1 / c`, so the penalty matches
// 0.5 * |w|^2 + C * sum(logloss). The intercept is not penalised.

use crease_core::config::LogisticConfig;
use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression as LogisticParams};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{check_row, check_training_set, row_matrix, to_matrix, ModelError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    n_features: usize,
    fitted: FittedLogisticRegression<f64, bool>,
}

impl LogisticRegression {
    pub fn fit(x: &[Vec<f64>], y: &[bool], config: &LogisticConfig) -> Result<Self, ModelError> {
        let width = check_training_set(x, y)?;
        if y.iter().all(|&label| label == y[0]) {
            return Err(ModelError::SingleClass);
        }

        let dataset = Dataset::new(to_matrix(x, width)?, Array1::from(y.to_vec()));
        let fitted = LogisticParams::default()
            .alpha(1.0 / config.c)
            .with_intercept(true)
            .max_iterations(config.max_iter as u64)
            .gradient_tolerance(config.tolerance)
            .fit(&dataset)
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        info!(
            "fitted chase logistic regression: {} rows, {} features, intercept {:.4}",
            x.len(),
            width,
            fitted.intercept()
        );
        Ok(Self {
            n_features: width,
            fitted,
        })
    }

    /// One weight per feature, in row order.
    pub fn coefficients(&self) -> Vec<f64> {
        self.fitted.params().to_vec()
    }

    pub fn intercept(&self) -> f64 {
        self.fitted.intercept()
    }

    /// P(chase succeeds).
    pub fn positive_probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        check_row(row, self.n_features)?;
        let p = self
            .fitted
            .predict_probabilities(&row_matrix(row)?)
            .get(0)
            .copied()
            .ok_or_else(|| ModelError::Prediction("no probability for row".into()))?;
        // linfa reports the probability of whichever label it took as positive.
        Ok(if self.fitted.labels().pos.class { p } else { 1.0 - p })
    }

    /// `[P(false), P(true)]`.
    pub fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        let p = self.positive_probability(row)?;
        Ok([1.0 - p, p])
    }

    pub fn predict(&self, row: &[f64]) -> Result<bool, ModelError> {
        Ok(self.positive_probability(row)? >= 0.5)
    }
}
