use serde::Serialize;

use super::model::{Label, PredictionError};

pub const APPROVED_MESSAGE: &str = "✅ Prediction: The loan is LIKELY TO BE APPROVED!";
pub const REJECTED_MESSAGE: &str = "❌ Prediction: The loan is LIKELY TO BE REJECTED.";

/// Business reading of a classifier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    /// `"Yes"` is the only approving label; every other label rejects.
    pub fn from_label(label: &Label) -> Self {
        if label.is_approval() {
            Verdict::Approved
        } else {
            Verdict::Rejected
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Verdict::Approved => APPROVED_MESSAGE,
            Verdict::Rejected => REJECTED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// What the page shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Approval gets the balloons.
    pub celebrate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
            celebrate: false,
            verdict: None,
        }
    }
}

pub fn present(outcome: &Result<Label, PredictionError>) -> Banner {
    match outcome {
        Ok(label) => match Verdict::from_label(label) {
            Verdict::Approved => Banner {
                kind: BannerKind::Success,
                message: APPROVED_MESSAGE.to_string(),
                celebrate: true,
                verdict: Some(Verdict::Approved),
            },
            Verdict::Rejected => Banner {
                kind: BannerKind::Error,
                message: REJECTED_MESSAGE.to_string(),
                celebrate: false,
                verdict: Some(Verdict::Rejected),
            },
        },
        Err(err) => Banner::error(format!("An error occurred: {err}")),
    }
}
