// Random forest classifier for the pre-match winner model.
//
// Gini decision trees from linfa-trees, each fit on a bootstrap sample drawn
// from a seeded RNG. Class probabilities are the share of trees voting for
// each class, so a given config and training set always yield the same
// forest.

use std::collections::BTreeSet;

use crease_core::config::ForestConfig;
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{check_row, check_training_set, row_matrix, to_matrix, ModelError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    /// Distinct training labels, ascending. Probability vectors follow this order.
    classes: Vec<usize>,
    n_features: usize,
    /// Empty when training saw a single class.
    trees: Vec<DecisionTree<f64, usize>>,
}

impl RandomForest {
    pub fn fit(x: &[Vec<f64>], y: &[usize], config: &ForestConfig) -> Result<Self, ModelError> {
        let width = check_training_set(x, y)?;
        let classes: Vec<usize> = y
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() == 1 {
            info!("pre-match labels hold a single class; no trees fitted");
            return Ok(Self {
                classes,
                n_features: width,
                trees: Vec::new(),
            });
        }

        let records = to_matrix(x, width)?;
        let targets = Array1::from(y.to_vec());
        let params = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(config.max_depth)
            .min_weight_split(config.min_samples_split.max(2) as f32);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let n = x.len();
        let mut trees = Vec::with_capacity(config.n_estimators);
        for i in 0..config.n_estimators.max(1) {
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let bag = Dataset::new(
                records.select(Axis(0), &sample),
                targets.select(Axis(0), &sample),
            );
            let tree = params
                .fit(&bag)
                .map_err(|e| ModelError::Fit(format!("tree {i}: {e}")))?;
            trees.push(tree);
        }

        debug!("bootstrap samples of {} rows per tree", n);
        info!(
            "fitted random forest: {} trees, {} rows, {} classes",
            trees.len(),
            n,
            classes.len()
        );

        Ok(Self {
            classes,
            n_features: width,
            trees,
        })
    }

    /// Labels the probability vector is indexed by.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Per-class probabilities in `classes()` order; sums to 1.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.n_features)?;
        if self.trees.is_empty() {
            return match self.classes.len() {
                1 => Ok(vec![1.0]),
                _ => Err(ModelError::Prediction("forest has no fitted trees".into())),
            };
        }

        let records = row_matrix(row)?;
        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(&records);
            let slot = predicted
                .get(0)
                .and_then(|label| self.classes.binary_search(label).ok())
                .ok_or_else(|| {
                    ModelError::Prediction(format!("tree voted outside {:?}", self.classes))
                })?;
            votes[slot] += 1;
        }
        let n = self.trees.len() as f64;
        Ok(votes.into_iter().map(|v| v as f64 / n).collect())
    }

    /// Most probable label; the lower label wins ties.
    pub fn predict(&self, row: &[f64]) -> Result<usize, ModelError> {
        let proba = self.predict_proba(row)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes
            .get(best)
            .copied()
            .ok_or_else(|| ModelError::Prediction("forest has no classes".into()))
    }
}
