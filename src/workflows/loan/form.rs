use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::domain::{
    EducationLevel, EmployerCategory, EmploymentStatus, Gender, LoanPurpose, MaritalStatus,
    PropertyArea,
};

/// Values collected from the applicant form.
///
/// Every field carries a default, so an untouched form (or an empty JSON body) still
/// yields a complete application. Numeric domains are checked by [`Validate`] and float
/// fields must be finite. The categorical fields are closed enums and cannot hold
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoanApplicationForm {
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub applicant_income: f64,
    #[validate(range(min = 18.0, max = 100.0), custom(function = "finite"))]
    pub age: f64,
    pub gender: Gender,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub coapplicant_income: f64,
    pub marital_status: MaritalStatus,
    pub dependents: u32,
    pub education_level: EducationLevel,
    pub employment_status: EmploymentStatus,
    pub employer_category: EmployerCategory,

    #[validate(range(min = 300, max = 900))]
    pub credit_score: u16,
    pub existing_loans: u32,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub savings: f64,
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub dti_ratio: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub collateral_value: f64,
    pub property_area: PropertyArea,

    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub loan_amount: f64,
    #[validate(range(min = 1.0), custom(function = "finite"))]
    pub loan_term: f64,
    pub loan_purpose: LoanPurpose,
}

fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl Default for LoanApplicationForm {
    fn default() -> Self {
        Self {
            applicant_income: 5000.0,
            age: 30.0,
            gender: Gender::Male,
            coapplicant_income: 0.0,
            marital_status: MaritalStatus::Single,
            dependents: 0,
            education_level: EducationLevel::Graduate,
            employment_status: EmploymentStatus::Salaried,
            employer_category: EmployerCategory::Government,
            credit_score: 700,
            existing_loans: 0,
            savings: 1000.0,
            dti_ratio: 0.3,
            collateral_value: 0.0,
            property_area: PropertyArea::Urban,
            loan_amount: 20000.0,
            loan_term: 360.0,
            loan_purpose: LoanPurpose::Home,
        }
    }
}

/// Input widget description used by the page renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    Number {
        name: &'static str,
        label: &'static str,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
        decimals: usize,
    },
    Slider {
        name: &'static str,
        label: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    Select {
        name: &'static str,
        label: &'static str,
        options: Vec<&'static str>,
        selected: &'static str,
    },
}

impl FieldControl {
    pub fn name(&self) -> &'static str {
        match self {
            FieldControl::Number { name, .. }
            | FieldControl::Slider { name, .. }
            | FieldControl::Select { name, .. } => *name,
        }
    }
}

/// Titled group of controls laid out side by side in columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSection {
    pub title: &'static str,
    pub columns: Vec<Vec<FieldControl>>,
}

fn money(name: &'static str, label: &'static str, value: f64) -> FieldControl {
    FieldControl::Number {
        name,
        label,
        value,
        min: Some(0.0),
        max: None,
        step: 0.01,
        decimals: 2,
    }
}

fn count(name: &'static str, label: &'static str, value: u32) -> FieldControl {
    FieldControl::Number {
        name,
        label,
        value: f64::from(value),
        min: Some(0.0),
        max: None,
        step: 1.0,
        decimals: 0,
    }
}

fn select<T: Copy>(
    name: &'static str,
    label: &'static str,
    options: Vec<&'static str>,
    selected: T,
    label_of: fn(T) -> &'static str,
) -> FieldControl {
    FieldControl::Select {
        name,
        label,
        options,
        selected: label_of(selected),
    }
}

impl LoanApplicationForm {
    /// Controls grouped as applicant identity, financial details, and loan request,
    /// pre-filled with this form's values.
    pub fn sections(&self) -> Vec<FormSection> {
        vec![
            FormSection {
                title: "Applicant Information",
                columns: vec![
                    vec![
                        money("applicant_income", "Applicant Income", self.applicant_income),
                        FieldControl::Number {
                            name: "age",
                            label: "Age",
                            value: self.age,
                            min: Some(18.0),
                            max: Some(100.0),
                            step: 0.01,
                            decimals: 2,
                        },
                        select("gender", "Gender", Gender::option_labels(), self.gender, Gender::label),
                    ],
                    vec![
                        money(
                            "coapplicant_income",
                            "Coapplicant Income",
                            self.coapplicant_income,
                        ),
                        select(
                            "marital_status",
                            "Marital Status",
                            MaritalStatus::option_labels(),
                            self.marital_status,
                            MaritalStatus::label,
                        ),
                        count("dependents", "Number of Dependents", self.dependents),
                    ],
                    vec![
                        select(
                            "education_level",
                            "Education Level",
                            EducationLevel::option_labels(),
                            self.education_level,
                            EducationLevel::label,
                        ),
                        select(
                            "employment_status",
                            "Employment Status",
                            EmploymentStatus::option_labels(),
                            self.employment_status,
                            EmploymentStatus::label,
                        ),
                        select(
                            "employer_category",
                            "Employer Category",
                            EmployerCategory::option_labels(),
                            self.employer_category,
                            EmployerCategory::label,
                        ),
                    ],
                ],
            },
            FormSection {
                title: "Financial Details",
                columns: vec![
                    vec![
                        FieldControl::Slider {
                            name: "credit_score",
                            label: "Credit Score",
                            value: i64::from(self.credit_score),
                            min: 300,
                            max: 900,
                        },
                        count("existing_loans", "Existing Loans Count", self.existing_loans),
                    ],
                    vec![
                        money("savings", "Savings Balance", self.savings),
                        FieldControl::Number {
                            name: "dti_ratio",
                            label: "DTI Ratio (0.0 to 1.0)",
                            value: self.dti_ratio,
                            min: Some(0.0),
                            max: Some(1.0),
                            step: 0.01,
                            decimals: 2,
                        },
                    ],
                    vec![
                        money("collateral_value", "Collateral Value", self.collateral_value),
                        select(
                            "property_area",
                            "Property Area",
                            PropertyArea::option_labels(),
                            self.property_area,
                            PropertyArea::label,
                        ),
                    ],
                ],
            },
            FormSection {
                title: "Loan Request Details",
                columns: vec![
                    vec![
                        money("loan_amount", "Requested Loan Amount", self.loan_amount),
                        FieldControl::Number {
                            name: "loan_term",
                            label: "Loan Term (Months)",
                            value: self.loan_term,
                            min: Some(1.0),
                            max: None,
                            step: 0.01,
                            decimals: 2,
                        },
                    ],
                    vec![select(
                        "loan_purpose",
                        "Loan Purpose",
                        LoanPurpose::option_labels(),
                        self.loan_purpose,
                        LoanPurpose::label,
                    )],
                ],
            },
        ]
    }
}
