//! Random forest artifact exported from scikit-learn.
//!
//! Each tree is the flattened `tree_` structure of a fitted
//! `DecisionTreeClassifier`: parallel node arrays where a leaf has
//! `children_left == children_right == -1`, and `value[node]` is the class
//! distribution (counts or fractions) at that node.
//!
//! ```json
//! {
//!   "n_features": 8,
//!   "classes": [0, 1],
//!   "trees": [{
//!     "children_left":  [1, -1, -1],
//!     "children_right": [2, -1, -1],
//!     "feature":        [5, -2, -2],
//!     "threshold":      [1.5, -2.0, -2.0],
//!     "value":          [[10, 10], [10, 0], [0, 10]]
//!   }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use renalyx_common::{InferenceError, FEATURE_COUNT};

use crate::{Classifier, LoadError};

const LEAF: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> Result<(), LoadError> {
        let n = self.node_count();
        if n == 0 {
            return Err(LoadError::Invalid(format!("tree {index} has no nodes")));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(LoadError::Invalid(format!(
                "tree {index} node arrays differ in length"
            )));
        }

        let in_range = |child: i64| child >= 0 && (child as usize) < n;
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(LoadError::Invalid(format!(
                        "tree {index} node {node} has exactly one child"
                    )));
                }
            } else {
                if !in_range(left) || !in_range(right) {
                    return Err(LoadError::Invalid(format!(
                        "tree {index} node {node} points outside the tree"
                    )));
                }
                let feature = self.feature[node];
                if feature < 0 || feature as usize >= n_features {
                    return Err(LoadError::Invalid(format!(
                        "tree {index} node {node} splits on unknown feature {feature}"
                    )));
                }
            }
            if self.value[node].len() != n_classes {
                return Err(LoadError::Invalid(format!(
                    "tree {index} node {node} has {} class weights, expected {n_classes}",
                    self.value[node].len()
                )));
            }
        }
        Ok(())
    }

    /// Index of the leaf reached by `row`.
    fn leaf(&self, row: &[f64]) -> Result<usize, InferenceError> {
        let mut node = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.node_count() {
            let left = self.children_left[node];
            if left == LEAF {
                return Ok(node);
            }
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Err(InferenceError::Evaluation(
            "decision tree contains a cycle".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub classes: Vec<f64>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let forest: RandomForest = serde_json::from_str(json)?;
        forest.validate()?;
        debug!(
            "Random forest: {} trees, {} classes",
            forest.trees.len(),
            forest.classes.len()
        );
        Ok(forest)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.n_features != FEATURE_COUNT {
            return Err(LoadError::Invalid(format!(
                "forest expects {} features, the pipeline provides {FEATURE_COUNT}",
                self.n_features
            )));
        }
        if self.classes.is_empty() {
            return Err(LoadError::Invalid("forest has no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(LoadError::Invalid("forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    /// Mean of the per-tree normalised leaf distributions.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if row.len() != self.n_features {
            return Err(InferenceError::Shape {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let dist = &tree.value[tree.leaf(row)?];
            let total: f64 = dist.iter().sum();
            if total > 0.0 {
                for (p, w) in proba.iter_mut().zip(dist) {
                    *p += w / total;
                }
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let proba = self.predict_proba(row)?;
        // First maximum wins on ties.
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stump on serum_creatinine (column 5) at 1.5.
    const STUMP: &str = r#"{
        "n_features": 8,
        "classes": [0, 1],
        "trees": [{
            "children_left":  [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature":        [5, -2, -2],
            "threshold":      [1.5, -2.0, -2.0],
            "value":          [[10, 10], [10, 0], [0, 10]]
        }]
    }"#;

    fn row(creatinine: f64) -> [f64; 8] {
        [1.02, 0.0, 14.0, 0.0, 10.0, creatinine, 0.0, 2.0]
    }

    #[test]
    fn test_stump_splits_on_threshold() {
        let forest = RandomForest::from_json(STUMP).unwrap();
        assert_eq!(forest.predict(&row(0.8)).unwrap(), 0.0);
        assert_eq!(forest.predict(&row(6.0)).unwrap(), 1.0);
        // sklearn sends ties to the left child
        assert_eq!(forest.predict(&row(1.5)).unwrap(), 0.0);
    }

    #[test]
    fn test_forest_averages_trees() {
        // Second tree always votes 70/30 for class 0.
        let json = r#"{
            "n_features": 8,
            "classes": [0, 1],
            "trees": [
                {
                    "children_left":  [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature":        [5, -2, -2],
                    "threshold":      [1.5, -2.0, -2.0],
                    "value":          [[0.5, 0.5], [1.0, 0.0], [0.0, 1.0]]
                },
                {
                    "children_left":  [-1],
                    "children_right": [-1],
                    "feature":        [-2],
                    "threshold":      [-2.0],
                    "value":          [[7, 3]]
                }
            ]
        }"#;
        let forest = RandomForest::from_json(json).unwrap();
        let proba = forest.predict_proba(&row(6.0)).unwrap();
        assert!((proba[0] - 0.35).abs() < 1e-9);
        assert!((proba[1] - 0.65).abs() < 1e-9);
        assert_eq!(forest.predict(&row(6.0)).unwrap(), 1.0);
    }

    #[test]
    fn test_wrong_row_length_is_shape_error() {
        let forest = RandomForest::from_json(STUMP).unwrap();
        let err = forest.predict(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, InferenceError::Shape { expected: 8, actual: 2 });
    }

    #[test]
    fn test_rejects_feature_count_mismatch() {
        let json = STUMP.replace("\"n_features\": 8", "\"n_features\": 24");
        assert!(matches!(RandomForest::from_json(&json), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_rejects_dangling_child() {
        let json = STUMP.replace("[2, -1, -1]", "[9, -1, -1]");
        assert!(matches!(RandomForest::from_json(&json), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_rejects_truncated_json() {
        assert!(matches!(RandomForest::from_json(&STUMP[..40]), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_cycle_detected_at_evaluation() {
        let json = r#"{
            "n_features": 8,
            "classes": [0, 1],
            "trees": [{
                "children_left":  [1, 0],
                "children_right": [1, 0],
                "feature":        [0, 0],
                "threshold":      [0.0, 0.0],
                "value":          [[1, 0], [0, 1]]
            }]
        }"#;
        let forest = RandomForest::from_json(json).unwrap();
        assert!(matches!(
            forest.predict(&row(1.0)),
            Err(InferenceError::Evaluation(_))
        ));
    }
}
