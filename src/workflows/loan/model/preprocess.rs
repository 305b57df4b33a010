use std::collections::HashSet;

use super::artifact::{ArtifactError, PreprocessorSpec};
use super::PredictionError;
use crate::workflows::loan::domain::Column;

#[derive(Debug, Clone)]
struct ScaledColumn {
    column: String,
    position: usize,
    mean: f64,
    scale: f64,
}

#[derive(Debug, Clone)]
struct OneHotColumn {
    column: String,
    position: usize,
    categories: Vec<String>,
}

/// Compiled column transformer with input positions resolved against `feature_names_in`.
#[derive(Debug, Clone)]
pub(crate) struct Preprocessor {
    scaled: Vec<ScaledColumn>,
    one_hot: Vec<OneHotColumn>,
}

impl Preprocessor {
    pub(crate) fn compile(
        spec: &PreprocessorSpec,
        feature_names_in: &[String],
    ) -> Result<Self, ArtifactError> {
        let position_of = |column: &str| {
            feature_names_in
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| ArtifactError::UnknownColumn(column.to_string()))
        };
        let mut seen = HashSet::new();

        let mut scaled = Vec::with_capacity(spec.numeric.len());
        for numeric in &spec.numeric {
            if !seen.insert(numeric.column.as_str()) {
                return Err(ArtifactError::DuplicateColumn(numeric.column.clone()));
            }
            if !numeric.mean.is_finite() || !numeric.scale.is_finite() || numeric.scale == 0.0 {
                return Err(ArtifactError::InvalidScaler {
                    column: numeric.column.clone(),
                    mean: numeric.mean,
                    scale: numeric.scale,
                });
            }
            scaled.push(ScaledColumn {
                column: numeric.column.clone(),
                position: position_of(&numeric.column)?,
                mean: numeric.mean,
                scale: numeric.scale,
            });
        }

        let mut one_hot = Vec::with_capacity(spec.categorical.len());
        for categorical in &spec.categorical {
            if !seen.insert(categorical.column.as_str()) {
                return Err(ArtifactError::DuplicateColumn(categorical.column.clone()));
            }
            if categorical.categories.is_empty() {
                return Err(ArtifactError::EmptyCategories(categorical.column.clone()));
            }
            one_hot.push(OneHotColumn {
                column: categorical.column.clone(),
                position: position_of(&categorical.column)?,
                categories: categorical.categories.clone(),
            });
        }

        let preprocessor = Self { scaled, one_hot };
        if preprocessor.width() == 0 {
            return Err(ArtifactError::EmptyTransform);
        }
        Ok(preprocessor)
    }

    /// Number of features handed to the estimator.
    pub(crate) fn width(&self) -> usize {
        self.scaled.len()
            + self
                .one_hot
                .iter()
                .map(|column| column.categories.len())
                .sum::<usize>()
    }

    /// Expects `columns` already checked against `feature_names_in`.
    pub(crate) fn transform(&self, columns: &[Column]) -> Result<Vec<f64>, PredictionError> {
        let mut features = Vec::with_capacity(self.width());

        for step in &self.scaled {
            let value = columns[step.position].value;
            let raw = value.as_f64().ok_or_else(|| PredictionError::TypeMismatch {
                column: step.column.clone(),
                value: value.to_string(),
            })?;
            if !raw.is_finite() {
                return Err(PredictionError::NonFiniteValue {
                    column: step.column.clone(),
                });
            }
            features.push((raw - step.mean) / step.scale);
        }

        for step in &self.one_hot {
            let value = columns[step.position].value;
            let rendered = value.to_string();
            let hot = step
                .categories
                .iter()
                .position(|category| *category == rendered)
                .ok_or_else(|| PredictionError::UnknownCategory {
                    column: step.column.clone(),
                    value: rendered.clone(),
                })?;
            features.extend(
                (0..step.categories.len()).map(|index| if index == hot { 1.0 } else { 0.0 }),
            );
        }

        Ok(features)
    }
}
