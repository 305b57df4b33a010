//! Loan approval prediction: form intake, record assembly, classification, and
//! presentation of the verdict.

pub mod assembler;
pub mod domain;
pub mod form;
pub mod model;
pub mod predictor;
pub mod presenter;
pub mod router;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use assembler::{assemble, APPLICANT_ID_PLACEHOLDER};
pub use domain::{
    ApplicationRecord, Column, ColumnValue, EducationLevel, EmployerCategory, EmploymentStatus,
    Gender, LoanPurpose, MaritalStatus, PropertyArea, COLUMN_COUNT, COLUMN_ORDER,
};
pub use form::{FieldControl, FormSection, LoanApplicationForm};
pub use model::{
    ArtifactError, ClassifierPipeline, EstimatorKind, Label, LoanClassifier, ModelArtifact,
    PredictionError, APPROVAL_LABEL,
};
pub use predictor::{LoanPredictor, SubmissionReport};
pub use presenter::{present, Banner, BannerKind, Verdict, APPROVED_MESSAGE, REJECTED_MESSAGE};
pub use router::{loan_router, ModelSelection, PredictionRequest, PredictionResponse};
pub use store::{ModelChoice, ModelLoadError, ModelStore, FOREST_ARTIFACT, LOGISTIC_ARTIFACT};
