use std::sync::Arc;

use super::common::*;
use crate::workflows::loan::assembler::assemble;
use crate::workflows::loan::form::LoanApplicationForm;
use crate::workflows::loan::model::PredictionError;
use crate::workflows::loan::presenter::{BannerKind, APPROVED_MESSAGE, REJECTED_MESSAGE};
use crate::workflows::loan::store::ModelChoice;

#[test]
fn random_forest_selection_routes_to_ensemble_handle() {
    let ensemble = RecordingClassifier::new("ensemble", "Yes");
    let linear = RecordingClassifier::new("linear", "No");
    let predictor = predictor_with(ensemble.clone(), linear.clone());

    let choice = ModelChoice::from_label("Random Forest (Highly Accurate)").expect("known label");
    let record = assemble(&LoanApplicationForm::default());
    let label = predictor.predict(&record, choice).expect("prediction succeeds");

    assert_eq!(label.as_str(), "Yes");
    let calls = ensemble.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], vec![record], "one-row batch with the assembled record");
    assert!(linear.calls().is_empty());
}

#[test]
fn logistic_selection_routes_to_linear_handle() {
    let ensemble = RecordingClassifier::new("ensemble", "Yes");
    let linear = RecordingClassifier::new("linear", "No");
    let predictor = predictor_with(ensemble.clone(), linear.clone());

    let choice = ModelChoice::from_label("Logistic Regression").expect("known label");
    let report = predictor
        .submit(&LoanApplicationForm::default(), choice)
        .expect("default form is valid");

    assert_eq!(report.model, ModelChoice::LogisticRegression);
    assert_eq!(report.banner.message, REJECTED_MESSAGE);
    assert_eq!(linear.calls().len(), 1);
    assert!(ensemble.calls().is_empty());
}

#[test]
fn handle_failure_becomes_error_banner() {
    let predictor = predictor_with(
        Arc::new(FailingClassifier("Input contains NaN")),
        RecordingClassifier::new("linear", "Yes"),
    );

    let report = predictor
        .submit(&LoanApplicationForm::default(), ModelChoice::RandomForest)
        .expect("validation passes");

    assert_eq!(
        report.outcome,
        Err(PredictionError::Model("Input contains NaN".to_string()))
    );
    assert_eq!(report.banner.kind, BannerKind::Error);
    assert!(report.banner.message.contains("Input contains NaN"));
    assert_ne!(report.banner.message, APPROVED_MESSAGE);
    assert_ne!(report.banner.message, REJECTED_MESSAGE);
}

#[test]
fn empty_model_output_is_an_error() {
    let predictor = predictor_with(
        Arc::new(SilentClassifier),
        RecordingClassifier::new("linear", "Yes"),
    );
    let record = assemble(&LoanApplicationForm::default());

    let err = predictor
        .predict(&record, ModelChoice::RandomForest)
        .expect_err("no label returned");
    assert_eq!(
        err,
        PredictionError::EmptyOutput {
            model: "silent".to_string()
        }
    );
}

#[test]
fn failed_request_does_not_affect_the_next_one() {
    let linear = RecordingClassifier::new("linear", "Yes");
    let predictor = predictor_with(Arc::new(FailingClassifier("boom")), linear.clone());

    let first = predictor
        .submit(&LoanApplicationForm::default(), ModelChoice::RandomForest)
        .expect("valid form");
    assert!(first.outcome.is_err());

    let second = predictor
        .submit(&LoanApplicationForm::default(), ModelChoice::LogisticRegression)
        .expect("valid form");
    assert_eq!(second.banner.message, APPROVED_MESSAGE);
    assert!(second.banner.celebrate);
}

#[test]
fn invalid_form_never_reaches_a_model() {
    let ensemble = RecordingClassifier::new("ensemble", "Yes");
    let predictor = predictor_with(ensemble.clone(), RecordingClassifier::new("linear", "Yes"));

    let form = LoanApplicationForm {
        age: 101.0,
        ..LoanApplicationForm::default()
    };
    let errors = predictor
        .submit(&form, ModelChoice::RandomForest)
        .expect_err("age above range");
    assert!(errors.field_errors().contains_key("age"));
    assert!(ensemble.calls().is_empty());
}

#[test]
fn default_form_against_shipped_models_never_errors() {
    let predictor = shipped_predictor();
    for choice in ModelChoice::OPTIONS {
        let report = predictor
            .submit(&LoanApplicationForm::default(), choice)
            .expect("default form is valid");
        assert!(report.outcome.is_ok(), "{choice}: {:?}", report.outcome);
        assert!(
            report.banner.message == APPROVED_MESSAGE || report.banner.message == REJECTED_MESSAGE,
            "{choice} rendered {}",
            report.banner.message
        );
    }
}

#[test]
fn boundary_values_are_scored_by_shipped_models() {
    let predictor = shipped_predictor();
    let boundaries = [(18.0, 300, 0.0), (100.0, 900, 1.0)];
    for (age, credit_score, dti_ratio) in boundaries {
        let form = LoanApplicationForm {
            age,
            credit_score,
            dti_ratio,
            ..LoanApplicationForm::default()
        };
        for choice in ModelChoice::OPTIONS {
            let report = predictor.submit(&form, choice).expect("boundary accepted");
            assert!(report.outcome.is_ok(), "{choice}: {:?}", report.outcome);
        }
    }
}
