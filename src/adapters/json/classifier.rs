//! Fitted binary classifiers exported as JSON.
//!
//! Two model families are supported:
//! - logistic regression (`coef_[0]`, `intercept_[0]`)
//! - random forest, each tree flattened into `split` / `leaf` nodes with
//!   scikit-learn semantics (`x[feature] <= threshold` goes left)

use serde::{Deserialize, Serialize};

use crate::ports::{ArtifactError, Classifier};

use super::MODEL_FILE;

/// One node of a flattened decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample counts (or fractions) at this leaf
    Leaf(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Root is node 0
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to a leaf and return its normalized class distribution.
    fn leaf_distribution(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        let mut index = 0;
        // A valid tree reaches a leaf in fewer hops than it has nodes.
        for _ in 0..self.nodes.len() {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf(counts) => {
                    let total: f64 = counts.iter().sum();
                    if total <= 0.0 {
                        return Err(ArtifactError::Inference("empty leaf distribution".into()));
                    }
                    return Ok(counts.iter().map(|c| c / total).collect());
                }
            }
        }
        Err(ArtifactError::Inference("decision tree contains a cycle".into()))
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {i} splits on feature {feature}"));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {i} has a NaN threshold"));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(format!("node {i} points past the end of the tree"));
                    }
                }
                TreeNode::Leaf(counts) => {
                    if counts.len() != n_classes {
                        return Err(format!(
                            "leaf {i} has {} classes, expected {n_classes}",
                            counts.len()
                        ));
                    }
                    if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
                        return Err(format!("leaf {i} has an invalid count"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Classifier parameters, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    },
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ClassifierModel {
    /// # Errors
    /// Returns `ArtifactError::Malformed` describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let malformed = |reason: String| ArtifactError::Malformed {
            name: MODEL_FILE.to_string(),
            reason,
        };

        match self {
            Self::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if coefficients.is_empty() {
                    return Err(malformed("no coefficients".into()));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(malformed("non-finite coefficient".into()));
                }
            }
            Self::RandomForest {
                n_features,
                n_classes,
                trees,
            } => {
                if *n_features == 0 {
                    return Err(malformed("n_features must be positive".into()));
                }
                if *n_classes < 2 {
                    return Err(malformed(format!("n_classes {n_classes} must be at least 2")));
                }
                if trees.is_empty() {
                    return Err(malformed("forest has no trees".into()));
                }
                for (t, tree) in trees.iter().enumerate() {
                    tree.validate(*n_features, *n_classes)
                        .map_err(|e| malformed(format!("tree {t}: {e}")))?;
                }
            }
        }
        Ok(())
    }

    fn check_width(&self, row: &[f64]) -> Result<(), ArtifactError> {
        if row.len() != self.n_features() {
            return Err(ArtifactError::Shape(format!(
                "classifier got {} values, expected {}",
                row.len(),
                self.n_features()
            )));
        }
        Ok(())
    }

    fn decision_function(coefficients: &[f64], intercept: f64, row: &[f64]) -> f64 {
        coefficients
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + intercept
    }
}

impl Classifier for ClassifierModel {
    fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression { coefficients, .. } => coefficients.len(),
            Self::RandomForest { n_features, .. } => *n_features,
        }
    }

    fn predict(&self, row: &[f64]) -> Result<usize, ArtifactError> {
        self.check_width(row)?;
        match self {
            Self::LogisticRegression {
                coefficients,
                intercept,
            } => {
                let z = Self::decision_function(coefficients, *intercept, row);
                Ok(usize::from(z > 0.0))
            }
            Self::RandomForest { .. } => {
                let proba = self.predict_proba(row)?;
                // First maximum wins, as with numpy argmax.
                let mut best = 0;
                for (class, p) in proba.iter().enumerate() {
                    if *p > proba[best] {
                        best = class;
                    }
                }
                Ok(best)
            }
        }
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        self.check_width(row)?;
        match self {
            Self::LogisticRegression {
                coefficients,
                intercept,
            } => {
                let p = sigmoid(Self::decision_function(coefficients, *intercept, row));
                Ok(vec![1.0 - p, p])
            }
            Self::RandomForest {
                n_classes, trees, ..
            } => {
                let mut sum = vec![0.0; *n_classes];
                for tree in trees {
                    for (acc, p) in sum.iter_mut().zip(tree.leaf_distribution(row)?) {
                        *acc += p;
                    }
                }
                let n = trees.len() as f64;
                Ok(sum.into_iter().map(|s| s / n).collect())
            }
        }
    }
}
