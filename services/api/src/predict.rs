use clap::Args;
use loan_approval::config::AppConfig;
use loan_approval::error::AppError;
use loan_approval::workflows::loan::{
    LoanApplicationForm, LoanPredictor, ModelChoice, ModelStore, SubmissionReport,
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// JSON file with application fields. Missing fields take the form defaults.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Model to score with: a selector label or random_forest / logistic_regression
    #[arg(long, value_parser = parse_model_choice)]
    pub(crate) model: Option<ModelChoice>,
    /// Directory holding the two model artifacts
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
}

pub(crate) fn parse_model_choice(raw: &str) -> Result<ModelChoice, String> {
    ModelChoice::try_from(raw.to_string())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        input,
        model,
        model_dir,
    } = args;

    let directory = match model_dir {
        Some(directory) => directory,
        None => AppConfig::load()?.models.directory,
    };
    let form = match input {
        Some(path) => read_form(&path)?,
        None => LoanApplicationForm::default(),
    };

    let predictor = LoanPredictor::new(Arc::new(ModelStore::load(&directory)?));
    let report = predictor
        .submit(&form, model.unwrap_or_default())
        .map_err(|errors| AppError::Input(errors.to_string()))?;

    print!("{}", render_record(&report));
    match report.outcome {
        Ok(_) => {
            println!("{}", report.banner.message);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn read_form(path: &Path) -> Result<LoanApplicationForm, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::Input(format!("could not parse {}: {err}", path.display())))
}

fn render_record(report: &SubmissionReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Model: {}", report.model);
    output.push_str("Application record:\n");
    for column in report.record.columns() {
        let _ = writeln!(output, "  {:<20} {}", column.name, column.value);
    }
    output
}
