//! Pre-fitted regression models.
//!
//! Models are fitted offline and exported as JSON. Three shapes are
//! understood: ordinary linear regression, a single CART decision tree, and a
//! random forest that averages its trees.

use serde::{Deserialize, Serialize};

use crate::encoding::{FeatureVector, FEATURE_COUNT};

/// Anything that maps a scaled feature vector to a single prediction.
pub trait Regressor {
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// `y = intercept + sum(coefficients[i] * x[i])`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    fn check(&self) -> Result<(), String> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients and intercept must be finite".to_string());
        }
        Ok(())
    }
}

impl Regressor for LinearRegression {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }
}

/// One node of a fitted tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn check(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, only {FEATURE_COUNT} exist"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    // Children always follow their parent, so every walk ends.
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child index {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Regressor for DecisionTree {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let mut idx = 0usize;

        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let fvalue = features.get(*feature).unwrap_or(f64::NAN);
                    idx = if fvalue <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }

        // Only a tree that skipped `check` gets here. The non-finite output
        // is reported as Unclassified by `PredictionService::predict`.
        f64::NAN
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.check().map_err(|e| format!("tree {i}: {e}")))
    }
}

impl Regressor for RandomForest {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        sum / self.trees.len() as f64
    }
}

/// The fitted model, tagged by `kind` in its JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl RegressionModel {
    pub fn kind(&self) -> &'static str {
        match self {
            RegressionModel::Linear(_) => "linear",
            RegressionModel::DecisionTree(_) => "decision_tree",
            RegressionModel::RandomForest(_) => "random_forest",
        }
    }

    /// Structural checks run once at load time.
    pub fn check(&self) -> Result<(), String> {
        match self {
            RegressionModel::Linear(m) => m.check(),
            RegressionModel::DecisionTree(m) => m.check(),
            RegressionModel::RandomForest(m) => m.check(),
        }
    }
}

impl Regressor for RegressionModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        match self {
            RegressionModel::Linear(m) => m.predict(features),
            RegressionModel::DecisionTree(m) => m.predict(features),
            RegressionModel::RandomForest(m) => m.predict(features),
        }
    }
}
