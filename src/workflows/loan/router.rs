use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::ApplicationRecord;
use super::form::LoanApplicationForm;
use super::model::Label;
use super::predictor::LoanPredictor;
use super::presenter::{Banner, Verdict};
use super::store::ModelChoice;
use super::views::{render_page, PageView};
use crate::error::AppError;

/// Sidebar selection carried in the query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ModelSelection {
    #[serde(default)]
    pub model: ModelChoice,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub model: ModelChoice,
    #[serde(default)]
    pub application: LoanApplicationForm,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub model: ModelChoice,
    pub label: Label,
    pub verdict: Verdict,
    pub message: String,
    pub record: ApplicationRecord,
}

/// Router builder exposing the prediction page and its JSON counterpart.
pub fn loan_router(predictor: Arc<LoanPredictor>) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/predict", post(submit_page_handler))
        .route("/api/v1/loan/predictions", post(predict_api_handler))
        .with_state(predictor)
}

fn page(
    status: StatusCode,
    choice: ModelChoice,
    form: &LoanApplicationForm,
    banner: Option<&Banner>,
) -> Response {
    let html = render_page(&PageView {
        choice,
        form,
        banner,
    });
    (status, Html(html)).into_response()
}

pub(crate) async fn page_handler(Query(selection): Query<ModelSelection>) -> Response {
    page(
        StatusCode::OK,
        selection.model,
        &LoanApplicationForm::default(),
        None,
    )
}

pub(crate) async fn submit_page_handler(
    State(predictor): State<Arc<LoanPredictor>>,
    Query(selection): Query<ModelSelection>,
    submission: Result<Form<LoanApplicationForm>, FormRejection>,
) -> Response {
    let form = match submission {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(%rejection, "could not decode application form");
            let banner = Banner::error(format!(
                "An error occurred: {}. The form was reset to its default values.",
                rejection.body_text()
            ));
            return page(
                StatusCode::UNPROCESSABLE_ENTITY,
                selection.model,
                &LoanApplicationForm::default(),
                Some(&banner),
            );
        }
    };

    match predictor.submit(&form, selection.model) {
        Ok(report) => page(StatusCode::OK, selection.model, &form, Some(&report.banner)),
        Err(errors) => {
            let banner = Banner::error(format!("Invalid application: {errors}"));
            page(
                StatusCode::UNPROCESSABLE_ENTITY,
                selection.model,
                &form,
                Some(&banner),
            )
        }
    }
}

pub(crate) async fn predict_api_handler(
    State(predictor): State<Arc<LoanPredictor>>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    let report = predictor
        .submit(&request.application, request.model)
        .map_err(|errors| AppError::Input(errors.to_string()))?;

    let label = report.outcome?;
    let verdict = Verdict::from_label(&label);

    Ok(Json(PredictionResponse {
        model: report.model,
        label,
        verdict,
        message: verdict.message().to_string(),
        record: report.record,
    }))
}
