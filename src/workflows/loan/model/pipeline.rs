use std::collections::HashSet;

use tracing::trace;

use super::artifact::{ArtifactError, EstimatorKind, EstimatorSpec, ModelArtifact};
use super::forest::RandomForest;
use super::logistic::LogisticRegression;
use super::preprocess::Preprocessor;
use super::{Label, LoanClassifier, PredictionError};
use crate::workflows::loan::domain::{ApplicationRecord, Column};

#[derive(Debug, Clone)]
enum Estimator {
    Linear(LogisticRegression),
    Forest(RandomForest),
}

/// A fitted pipeline: column check, column transformer, then estimator.
#[derive(Debug, Clone)]
pub struct ClassifierPipeline {
    name: String,
    feature_names_in: Vec<String>,
    classes: Vec<String>,
    preprocessor: Preprocessor,
    estimator: Estimator,
}

impl ClassifierPipeline {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        let ModelArtifact {
            name,
            feature_names_in,
            classes,
            preprocessor,
            estimator,
        } = artifact;

        if feature_names_in.is_empty() {
            return Err(ArtifactError::NoFeatures);
        }
        if let Some(duplicate) = first_duplicate(&feature_names_in) {
            return Err(ArtifactError::DuplicateFeature(duplicate));
        }
        if let Some(duplicate) = first_duplicate(&classes) {
            return Err(ArtifactError::DuplicateClass(duplicate));
        }

        let preprocessor = Preprocessor::compile(&preprocessor, &feature_names_in)?;
        let width = preprocessor.width();
        let estimator = match &estimator {
            EstimatorSpec::LogisticRegression(spec) => {
                Estimator::Linear(LogisticRegression::compile(spec, width, classes.len())?)
            }
            EstimatorSpec::RandomForest(spec) => {
                Estimator::Forest(RandomForest::compile(spec, width, classes.len())?)
            }
        };

        Ok(Self {
            name,
            feature_names_in,
            classes,
            preprocessor,
            estimator,
        })
    }

    /// Compiles an artifact and checks it holds the estimator the caller expects.
    pub fn expecting(
        artifact: ModelArtifact,
        expected: EstimatorKind,
    ) -> Result<Self, ArtifactError> {
        let found = artifact.estimator.kind();
        if found != expected {
            return Err(ArtifactError::UnexpectedEstimator { expected, found });
        }
        Self::from_artifact(artifact)
    }

    pub fn kind(&self) -> EstimatorKind {
        match self.estimator {
            Estimator::Linear(_) => EstimatorKind::LogisticRegression,
            Estimator::Forest(_) => EstimatorKind::RandomForest,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    fn check_columns(&self, columns: &[Column]) -> Result<(), PredictionError> {
        if columns.len() != self.feature_names_in.len() {
            return Err(PredictionError::ColumnCount {
                expected: self.feature_names_in.len(),
                found: columns.len(),
            });
        }
        for (position, (column, expected)) in
            columns.iter().zip(&self.feature_names_in).enumerate()
        {
            if column.name != expected.as_str() {
                return Err(PredictionError::SchemaMismatch {
                    position,
                    expected: expected.clone(),
                    found: column.name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Scores named, ordered columns directly; `predict` goes through here per record.
    pub fn predict_columns(&self, columns: &[Column]) -> Result<Label, PredictionError> {
        self.check_columns(columns)?;
        let features = self.preprocessor.transform(columns)?;

        let class = match &self.estimator {
            Estimator::Linear(model) => {
                trace!(
                    model = %self.name,
                    probability = model.probability(&features),
                    "scored row"
                );
                model.predict_class(&features)
            }
            Estimator::Forest(model) => {
                trace!(
                    model = %self.name,
                    probabilities = ?model.probabilities(&features),
                    "scored row"
                );
                model.predict_class(&features)
            }
        };

        Ok(Label::new(self.classes[class].clone()))
    }
}

impl LoanClassifier for ClassifierPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, batch: &[ApplicationRecord]) -> Result<Vec<Label>, PredictionError> {
        batch
            .iter()
            .map(|record| self.predict_columns(&record.columns()))
            .collect()
    }
}

fn first_duplicate(values: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .find(|value| !seen.insert(value.as_str()))
        .cloned()
}
