//! Pre-trained classifier handles and the artifact format they are loaded from.

mod artifact;
mod forest;
mod logistic;
mod pipeline;
mod preprocess;

pub use artifact::{
    ArtifactError, CategoricalColumnSpec, EstimatorKind, EstimatorSpec, ForestSpec, LogisticSpec,
    ModelArtifact, NodeSpec, NumericColumnSpec, PreprocessorSpec, TreeSpec,
};
pub use pipeline::ClassifierPipeline;

use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::ApplicationRecord;

/// The only label value the presenter gives meaning to.
pub const APPROVAL_LABEL: &str = "Yes";

/// Raw class label emitted by a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_approval(&self) -> bool {
        self.0 == APPROVAL_LABEL
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque binary classifier over application rows.
///
/// Implementations return one label per input row, in input order.
pub trait LoanClassifier: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, batch: &[ApplicationRecord]) -> Result<Vec<Label>, PredictionError>;
}

/// Failure raised while scoring a single request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("the model expects {expected} columns but the input has {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("feature names must match those seen during fit: position {position} expects '{expected}' but got '{found}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },
    #[error("could not convert value '{value}' of column '{column}' to float")]
    TypeMismatch { column: String, value: String },
    #[error("found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },
    #[error("input contains NaN or infinity in column '{column}'")]
    NonFiniteValue { column: String },
    #[error("model '{model}' returned no label for the submitted row")]
    EmptyOutput { model: String },
    #[error("{0}")]
    Model(String),
}
