use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::loan::domain::ApplicationRecord;
use crate::workflows::loan::model::{
    ClassifierPipeline, EstimatorKind, Label, LoanClassifier, ModelArtifact, PredictionError,
};
use crate::workflows::loan::predictor::LoanPredictor;
use crate::workflows::loan::store::ModelStore;

pub(super) const SHIPPED_FOREST: &str = include_str!("../../../../models/rf_loan_model.json");
pub(super) const SHIPPED_LOGISTIC: &str =
    include_str!("../../../../models/logistic_loan_model.json");

/// Stub handle that remembers every batch it was asked to score.
pub(super) struct RecordingClassifier {
    name: &'static str,
    label: &'static str,
    calls: Mutex<Vec<Vec<ApplicationRecord>>>,
}

impl RecordingClassifier {
    pub(super) fn new(name: &'static str, label: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            label,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn calls(&self) -> Vec<Vec<ApplicationRecord>> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

impl LoanClassifier for RecordingClassifier {
    fn name(&self) -> &str {
        self.name
    }

    fn predict(&self, batch: &[ApplicationRecord]) -> Result<Vec<Label>, PredictionError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(batch.to_vec());
        Ok(batch.iter().map(|_| Label::new(self.label)).collect())
    }
}

pub(super) struct FailingClassifier(pub(super) &'static str);

impl LoanClassifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _batch: &[ApplicationRecord]) -> Result<Vec<Label>, PredictionError> {
        Err(PredictionError::Model(self.0.to_string()))
    }
}

pub(super) struct SilentClassifier;

impl LoanClassifier for SilentClassifier {
    fn name(&self) -> &str {
        "silent"
    }

    fn predict(&self, _batch: &[ApplicationRecord]) -> Result<Vec<Label>, PredictionError> {
        Ok(Vec::new())
    }
}

pub(super) fn predictor_with(
    ensemble: Arc<dyn LoanClassifier>,
    linear: Arc<dyn LoanClassifier>,
) -> LoanPredictor {
    LoanPredictor::new(Arc::new(ModelStore::new(ensemble, linear)))
}

pub(super) fn shipped_pipeline(raw: &str, kind: EstimatorKind) -> ClassifierPipeline {
    let artifact: ModelArtifact = serde_json::from_str(raw).expect("shipped artifact parses");
    ClassifierPipeline::expecting(artifact, kind).expect("shipped artifact compiles")
}

pub(super) fn shipped_predictor() -> LoanPredictor {
    predictor_with(
        Arc::new(shipped_pipeline(SHIPPED_FOREST, EstimatorKind::RandomForest)),
        Arc::new(shipped_pipeline(
            SHIPPED_LOGISTIC,
            EstimatorKind::LogisticRegression,
        )),
    )
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("json payload")
}
