use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::loan::form::LoanApplicationForm;
use crate::workflows::loan::presenter::{APPROVED_MESSAGE, REJECTED_MESSAGE};
use crate::workflows::loan::router::{
    loan_router, page_handler, predict_api_handler, ModelSelection, PredictionRequest,
};
use crate::workflows::loan::store::ModelChoice;

const DEFAULT_FORM: &str = "applicant_income=5000&age=30&gender=Male&coapplicant_income=0\
&marital_status=Single&dependents=0&education_level=Graduate&employment_status=Salaried\
&employer_category=Government&credit_score=700&existing_loans=0&savings=1000&dti_ratio=0.3\
&collateral_value=0&property_area=Urban&loan_amount=20000&loan_term=360&loan_purpose=Home";

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn json_post(body: serde_json::Value) -> Request<Body> {
    Request::post("/api/v1/loan/predictions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn page_handler_renders_selected_model() {
    let response = page_handler(Query(ModelSelection {
        model: ModelChoice::LogisticRegression,
    }))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("🏦 Loan Approval Prediction System"));
    assert!(html.contains("action=\"/predict?model=logistic_regression\""));
}

#[tokio::test]
async fn index_defaults_to_random_forest() {
    let router = loan_router(Arc::new(shipped_predictor()));
    let response = router
        .oneshot(Request::get("/").body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("<option value=\"random_forest\" selected>"));
    assert!(html.contains("Check Loan Status"));
    assert!(!html.contains("role=\"alert\""));
}

#[tokio::test]
async fn unknown_model_in_query_is_a_bad_request() {
    let router = loan_router(Arc::new(shipped_predictor()));
    let response = router
        .oneshot(
            Request::get("/?model=xgboost")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn default_submission_shows_a_verdict_for_each_model() {
    for choice in ModelChoice::OPTIONS {
        let router = loan_router(Arc::new(shipped_predictor()));
        let uri = format!("/predict?model={}", choice.slug());
        let response = router
            .oneshot(form_post(&uri, DEFAULT_FORM))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let html = read_body(response).await;
        assert!(
            html.contains(APPROVED_MESSAGE) || html.contains(REJECTED_MESSAGE),
            "{choice} showed no verdict"
        );
        assert!(!html.contains("An error occurred"));
    }
}

#[tokio::test]
async fn approval_page_celebrates_and_keeps_entered_values() {
    let router = loan_router(Arc::new(predictor_with(
        RecordingClassifier::new("ensemble", "Yes"),
        RecordingClassifier::new("linear", "No"),
    )));
    let body = DEFAULT_FORM.replace("savings=1000", "savings=4321.5");

    let response = router
        .oneshot(form_post("/predict?model=random_forest", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains(APPROVED_MESSAGE));
    assert!(html.contains("class=\"balloons\""));
    assert!(html.contains("name=\"savings\" value=\"4321.50\""));
}

#[tokio::test]
async fn model_failure_is_shown_as_error_banner() {
    let router = loan_router(Arc::new(predictor_with(
        RecordingClassifier::new("ensemble", "Yes"),
        Arc::new(FailingClassifier("X has 18 features, but LogisticRegression is expecting 19")),
    )));

    let response = router
        .oneshot(form_post("/predict?model=logistic_regression", DEFAULT_FORM))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains(
        "An error occurred: X has 18 features, but LogisticRegression is expecting 19"
    ));
    assert!(!html.contains(APPROVED_MESSAGE));
    assert!(!html.contains(REJECTED_MESSAGE));
}

#[tokio::test]
async fn undecodable_form_is_unprocessable() {
    let router = loan_router(Arc::new(shipped_predictor()));
    let body = DEFAULT_FORM.replace("age=30", "age=thirty");

    let response = router
        .oneshot(form_post("/predict", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = read_body(response).await;
    assert!(html.contains("An error occurred:"));
    assert!(html.contains("The form was reset to its default values."));
    assert!(html.contains("name=\"age\" value=\"30.00\""));
}

#[tokio::test]
async fn out_of_range_form_is_unprocessable() {
    let ensemble = RecordingClassifier::new("ensemble", "Yes");
    let router = loan_router(Arc::new(predictor_with(
        ensemble.clone(),
        RecordingClassifier::new("linear", "Yes"),
    )));
    let body = DEFAULT_FORM.replace("credit_score=700", "credit_score=950");

    let response = router
        .oneshot(form_post("/predict", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = read_body(response).await;
    assert!(html.contains("Invalid application:"));
    assert!(ensemble.calls().is_empty());
}

#[tokio::test]
async fn non_finite_age_is_refused_before_scoring() {
    let ensemble = RecordingClassifier::new("ensemble", "Yes");
    let router = loan_router(Arc::new(predictor_with(
        ensemble.clone(),
        RecordingClassifier::new("linear", "Yes"),
    )));
    let body = DEFAULT_FORM.replace("age=30", "age=NaN");

    let response = router
        .oneshot(form_post("/predict?model=random_forest", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = read_body(response).await;
    assert!(html.contains("Invalid application:"));
    assert!(!html.contains(APPROVED_MESSAGE));
    assert!(ensemble.calls().is_empty());
}

#[tokio::test]
async fn infinite_income_is_a_validation_failure_for_shipped_models() {
    for choice in ModelChoice::OPTIONS {
        let router = loan_router(Arc::new(shipped_predictor()));
        let body = DEFAULT_FORM.replace("applicant_income=5000", "applicant_income=inf");
        let uri = format!("/predict?model={}", choice.slug());

        let response = router
            .oneshot(form_post(&uri, &body))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{choice}");
        let html = read_body(response).await;
        assert!(html.contains("Invalid application:"));
        assert!(!html.contains("An error occurred"));
    }
}

#[tokio::test]
async fn api_route_returns_verdict_and_record() {
    let router = loan_router(Arc::new(shipped_predictor()));
    let response = router
        .oneshot(json_post(json!({
            "model": "Logistic Regression",
            "application": { "credit_score": 300, "dti_ratio": 1.0, "existing_loans": 6, "applicant_income": 0.0 }
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["model"], json!("Logistic Regression"));
    assert_eq!(payload["label"], json!("No"));
    assert_eq!(payload["verdict"], json!("rejected"));
    assert_eq!(payload["message"], json!(REJECTED_MESSAGE));
    assert_eq!(payload["record"]["Applicant_ID"], json!(0.0));
    assert_eq!(payload["record"]["Credit_Score"], json!(300));
}

#[tokio::test]
async fn api_handler_rejects_invalid_application() {
    let response = predict_api_handler(
        State(Arc::new(shipped_predictor())),
        Json(PredictionRequest {
            model: ModelChoice::RandomForest,
            application: LoanApplicationForm {
                dti_ratio: 1.5,
                ..LoanApplicationForm::default()
            },
        }),
    )
    .await;

    let response = axum::response::IntoResponse::into_response(response);
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error text")
        .contains("dti_ratio"));
}

#[tokio::test]
async fn api_route_surfaces_model_failure() {
    let router = loan_router(Arc::new(predictor_with(
        Arc::new(FailingClassifier("model exploded")),
        RecordingClassifier::new("linear", "Yes"),
    )));

    let response = router
        .oneshot(json_post(json!({ "model": "random_forest" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("prediction error: model exploded"));
}
