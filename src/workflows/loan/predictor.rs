use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use validator::{Validate, ValidationErrors};

use super::assembler::assemble;
use super::domain::ApplicationRecord;
use super::form::LoanApplicationForm;
use super::model::{Label, PredictionError};
use super::presenter::{present, Banner};
use super::store::{ModelChoice, ModelStore};

/// Result of one form submission: the row that was scored, the raw outcome, and the
/// banner to show for it.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub model: ModelChoice,
    pub record: ApplicationRecord,
    #[serde(skip)]
    pub outcome: Result<Label, PredictionError>,
    pub banner: Banner,
}

/// Runs one assembled record through the selected classifier.
#[derive(Debug, Clone)]
pub struct LoanPredictor {
    store: Arc<ModelStore>,
}

impl LoanPredictor {
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// Scores a one-row batch. Failures are returned to the caller; there is no retry
    /// and no fallback to the other model.
    pub fn predict(
        &self,
        record: &ApplicationRecord,
        choice: ModelChoice,
    ) -> Result<Label, PredictionError> {
        let handle = self.store.handle(choice);
        let outcome = handle
            .predict(std::slice::from_ref(record))
            .and_then(|labels| {
                labels
                    .into_iter()
                    .next()
                    .ok_or_else(|| PredictionError::EmptyOutput {
                        model: handle.name().to_string(),
                    })
            });

        match &outcome {
            Ok(label) => debug!(model = %choice, %label, "prediction complete"),
            Err(err) => warn!(model = %choice, error = %err, "prediction failed"),
        }
        outcome
    }

    /// Validate, assemble, predict, present. Only validation aborts the flow; a failed
    /// prediction still produces a report carrying an error banner.
    pub fn submit(
        &self,
        form: &LoanApplicationForm,
        choice: ModelChoice,
    ) -> Result<SubmissionReport, ValidationErrors> {
        if let Err(errors) = form.validate() {
            debug!(model = %choice, %errors, "rejected application form");
            return Err(errors);
        }

        let record = assemble(form);
        let outcome = self.predict(&record, choice);
        let banner = present(&outcome);

        Ok(SubmissionReport {
            model: choice,
            record,
            outcome,
            banner,
        })
    }
}
