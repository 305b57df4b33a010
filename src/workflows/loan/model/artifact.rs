use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk description of a fitted preprocessing + classification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    /// Column names, in the order the pipeline was fitted on.
    pub feature_names_in: Vec<String>,
    pub classes: Vec<String>,
    pub preprocessor: PreprocessorSpec,
    pub estimator: EstimatorSpec,
}

/// Column transformer: scaled numeric columns followed by one-hot blocks.
/// Columns listed in neither group are dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreprocessorSpec {
    #[serde(default)]
    pub numeric: Vec<NumericColumnSpec>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumnSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnSpec {
    pub column: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumnSpec {
    pub column: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorSpec {
    LogisticRegression(LogisticSpec),
    RandomForest(ForestSpec),
}

impl EstimatorSpec {
    pub fn kind(&self) -> EstimatorKind {
        match self {
            EstimatorSpec::LogisticRegression(_) => EstimatorKind::LogisticRegression,
            EstimatorSpec::RandomForest(_) => EstimatorKind::RandomForest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticSpec {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSpec {
    pub trees: Vec<TreeSpec>,
}

/// Nodes are stored in pre-order: node 0 is the root and children always follow their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    /// Rows with `features[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class weights; normalized to a distribution at load time.
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    LogisticRegression,
    RandomForest,
}

impl EstimatorKind {
    pub const fn label(self) -> &'static str {
        match self {
            EstimatorKind::LogisticRegression => "logistic regression",
            EstimatorKind::RandomForest => "random forest",
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural problem found while compiling an artifact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("feature_names_in is empty")]
    NoFeatures,
    #[error("feature '{0}' appears more than once in feature_names_in")]
    DuplicateFeature(String),
    #[error("preprocessor column '{0}' is not listed in feature_names_in")]
    UnknownColumn(String),
    #[error("preprocessor lists column '{0}' more than once")]
    DuplicateColumn(String),
    #[error("column '{column}' has an invalid scaler (mean {mean}, scale {scale})")]
    InvalidScaler {
        column: String,
        mean: f64,
        scale: f64,
    },
    #[error("categorical column '{0}' has no categories")]
    EmptyCategories(String),
    #[error("preprocessor produces no features")]
    EmptyTransform,
    #[error("{estimator} needs {expected} classes, artifact lists {found}")]
    ClassCount {
        estimator: EstimatorKind,
        expected: usize,
        found: usize,
    },
    #[error("class '{0}' appears more than once")]
    DuplicateClass(String),
    #[error("estimator has {found} coefficients but the preprocessor yields {expected} features")]
    CoefficientCount { expected: usize, found: usize },
    #[error("estimator parameters must be finite")]
    NonFiniteParameter,
    #[error("random forest has no trees")]
    EmptyForest,
    #[error("tree {tree} node {node}: {reason}")]
    MalformedTree {
        tree: usize,
        node: usize,
        reason: String,
    },
    #[error("expected a {expected} estimator, artifact holds a {found}")]
    UnexpectedEstimator {
        expected: EstimatorKind,
        found: EstimatorKind,
    },
}
