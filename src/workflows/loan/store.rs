use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::{
    ArtifactError, ClassifierPipeline, EstimatorKind, LoanClassifier, ModelArtifact,
};

/// Artifact filename of the linear model inside the model directory.
pub const LOGISTIC_ARTIFACT: &str = "logistic_loan_model.json";
/// Artifact filename of the ensemble model inside the model directory.
pub const FOREST_ARTIFACT: &str = "rf_loan_model.json";

/// User-facing model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelChoice {
    #[default]
    RandomForest,
    LogisticRegression,
}

impl ModelChoice {
    pub const OPTIONS: [Self; 2] = [Self::RandomForest, Self::LogisticRegression];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RandomForest => "Random Forest (Highly Accurate)",
            Self::LogisticRegression => "Logistic Regression",
        }
    }

    /// Stable token used in query strings and select values.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::RandomForest => "random_forest",
            Self::LogisticRegression => "logistic_regression",
        }
    }

    /// Accepts the selector label, or anything naming one of the two models.
    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.contains("Random Forest") || raw.eq_ignore_ascii_case(Self::RandomForest.slug()) {
            Some(Self::RandomForest)
        } else if raw.contains("Logistic Regression")
            || raw.eq_ignore_ascii_case(Self::LogisticRegression.slug())
        {
            Some(Self::LogisticRegression)
        } else {
            None
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for ModelChoice {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value).ok_or_else(|| format!("unknown prediction model '{value}'"))
    }
}

impl From<ModelChoice> for String {
    fn from(value: ModelChoice) -> Self {
        value.label().to_string()
    }
}

/// Startup failure while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact {} could not be read: {source}", .path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact {} is inconsistent: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },
}

/// The two read-only classifier handles, loaded once and shared by every request.
#[derive(Clone)]
pub struct ModelStore {
    ensemble: Arc<dyn LoanClassifier>,
    linear: Arc<dyn LoanClassifier>,
}

impl fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelStore")
            .field("ensemble", &self.ensemble.name())
            .field("linear", &self.linear.name())
            .finish()
    }
}

impl ModelStore {
    pub fn new(ensemble: Arc<dyn LoanClassifier>, linear: Arc<dyn LoanClassifier>) -> Self {
        Self { ensemble, linear }
    }

    /// Loads both fixed-name artifacts from `directory`; either failing is fatal.
    pub fn load(directory: &Path) -> Result<Self, ModelLoadError> {
        let ensemble = load_pipeline(
            &directory.join(FOREST_ARTIFACT),
            EstimatorKind::RandomForest,
        )?;
        let linear = load_pipeline(
            &directory.join(LOGISTIC_ARTIFACT),
            EstimatorKind::LogisticRegression,
        )?;
        Ok(Self::new(Arc::new(ensemble), Arc::new(linear)))
    }

    pub fn handle(&self, choice: ModelChoice) -> &dyn LoanClassifier {
        match choice {
            ModelChoice::RandomForest => self.ensemble.as_ref(),
            ModelChoice::LogisticRegression => self.linear.as_ref(),
        }
    }
}

fn load_pipeline(path: &Path, kind: EstimatorKind) -> Result<ClassifierPipeline, ModelLoadError> {
    let raw = std::fs::read(path).map_err(|source| ModelLoadError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_slice(&raw).map_err(|source| ModelLoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    let pipeline =
        ClassifierPipeline::expecting(artifact, kind).map_err(|source| ModelLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        path = %path.display(),
        model = %pipeline.name(),
        estimator = %pipeline.kind(),
        features = pipeline.feature_names_in().len(),
        "loaded model artifact"
    );
    Ok(pipeline)
}
