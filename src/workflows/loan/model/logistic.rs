use super::artifact::{ArtifactError, EstimatorKind, LogisticSpec};

#[derive(Debug, Clone)]
pub(crate) struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub(crate) fn compile(
        spec: &LogisticSpec,
        width: usize,
        class_count: usize,
    ) -> Result<Self, ArtifactError> {
        if class_count != 2 {
            return Err(ArtifactError::ClassCount {
                estimator: EstimatorKind::LogisticRegression,
                expected: 2,
                found: class_count,
            });
        }
        if spec.coefficients.len() != width {
            return Err(ArtifactError::CoefficientCount {
                expected: width,
                found: spec.coefficients.len(),
            });
        }
        if !spec.intercept.is_finite() || spec.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::NonFiniteParameter);
        }

        Ok(Self {
            coefficients: spec.coefficients.clone(),
            intercept: spec.intercept,
        })
    }

    fn decision(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .map(|(weight, value)| weight * value)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the second class.
    pub(crate) fn probability(&self, features: &[f64]) -> f64 {
        1.0 / (1.0 + (-self.decision(features)).exp())
    }

    /// Index into the artifact's class list.
    pub(crate) fn predict_class(&self, features: &[f64]) -> usize {
        usize::from(self.decision(features) > 0.0)
    }
}
