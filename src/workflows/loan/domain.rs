use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed set of categories whose labels match the training data verbatim.
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const OPTIONS: &'static [Self] = &[$(Self::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn option_labels() -> Vec<&'static str> {
                Self::OPTIONS.iter().map(|option| option.label()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical!(
    EmploymentStatus {
        Salaried => "Salaried",
        SelfEmployed => "Self-employed",
    }
);

categorical!(
    MaritalStatus {
        Single => "Single",
        Married => "Married",
    }
);

categorical!(
    LoanPurpose {
        Home => "Home",
        Education => "Education",
        Personal => "Personal",
        Business => "Business",
    }
);

categorical!(
    PropertyArea {
        Urban => "Urban",
        Semiurban => "Semiurban",
        Rural => "Rural",
    }
);

categorical!(
    EducationLevel {
        Graduate => "Graduate",
        Undergraduate => "Undergraduate",
    }
);

categorical!(
    Gender {
        Male => "Male",
        Female => "Female",
    }
);

categorical!(
    /// Sector of the applicant's employer as recorded at training time.
    EmployerCategory {
        Government => "Government",
        Private => "Private",
        Consultant => "Consultant",
        It => "IT",
    }
);

pub const COLUMN_COUNT: usize = 19;

/// Column names in the order the classifiers were trained on.
pub const COLUMN_ORDER: [&str; COLUMN_COUNT] = [
    "Applicant_ID",
    "Applicant_Income",
    "Coapplicant_Income",
    "Employment_Status",
    "Age",
    "Marital_Status",
    "Dependents",
    "Credit_Score",
    "Existing_Loans",
    "DTI_Ratio",
    "Savings",
    "Collateral_Value",
    "Loan_Amount",
    "Loan_Term",
    "Loan_Purpose",
    "Property_Area",
    "Education_Level",
    "Gender",
    "Employer_Category",
];

/// Cell value handed to a classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue {
    Float(f64),
    Int(i64),
    Category(&'static str),
}

impl ColumnValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            ColumnValue::Float(value) => Some(value),
            ColumnValue::Int(value) => Some(value as f64),
            ColumnValue::Category(_) => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Float(value) => write!(f, "{value}"),
            ColumnValue::Int(value) => write!(f, "{value}"),
            ColumnValue::Category(value) => f.write_str(value),
        }
    }
}

/// One named cell of an [`ApplicationRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub value: ColumnValue,
}

/// One row of applicant and loan attributes, built per request and never stored.
///
/// Field declaration order matches [`COLUMN_ORDER`] so the JSON form of the record keeps
/// the training column order too.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRecord {
    #[serde(rename = "Applicant_ID")]
    pub applicant_id: f64,
    #[serde(rename = "Applicant_Income")]
    pub applicant_income: f64,
    #[serde(rename = "Coapplicant_Income")]
    pub coapplicant_income: f64,
    #[serde(rename = "Employment_Status")]
    pub employment_status: EmploymentStatus,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Marital_Status")]
    pub marital_status: MaritalStatus,
    #[serde(rename = "Dependents")]
    pub dependents: f64,
    #[serde(rename = "Credit_Score")]
    pub credit_score: i64,
    #[serde(rename = "Existing_Loans")]
    pub existing_loans: f64,
    #[serde(rename = "DTI_Ratio")]
    pub dti_ratio: f64,
    #[serde(rename = "Savings")]
    pub savings: f64,
    #[serde(rename = "Collateral_Value")]
    pub collateral_value: f64,
    #[serde(rename = "Loan_Amount")]
    pub loan_amount: f64,
    #[serde(rename = "Loan_Term")]
    pub loan_term: f64,
    #[serde(rename = "Loan_Purpose")]
    pub loan_purpose: LoanPurpose,
    #[serde(rename = "Property_Area")]
    pub property_area: PropertyArea,
    #[serde(rename = "Education_Level")]
    pub education_level: EducationLevel,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Employer_Category")]
    pub employer_category: EmployerCategory,
}

impl ApplicationRecord {
    /// The single mapping from record fields to named, ordered model columns.
    pub fn columns(&self) -> [Column; COLUMN_COUNT] {
        use ColumnValue::{Category, Float, Int};

        [
            column("Applicant_ID", Float(self.applicant_id)),
            column("Applicant_Income", Float(self.applicant_income)),
            column("Coapplicant_Income", Float(self.coapplicant_income)),
            column("Employment_Status", Category(self.employment_status.label())),
            column("Age", Float(self.age)),
            column("Marital_Status", Category(self.marital_status.label())),
            column("Dependents", Float(self.dependents)),
            column("Credit_Score", Int(self.credit_score)),
            column("Existing_Loans", Float(self.existing_loans)),
            column("DTI_Ratio", Float(self.dti_ratio)),
            column("Savings", Float(self.savings)),
            column("Collateral_Value", Float(self.collateral_value)),
            column("Loan_Amount", Float(self.loan_amount)),
            column("Loan_Term", Float(self.loan_term)),
            column("Loan_Purpose", Category(self.loan_purpose.label())),
            column("Property_Area", Category(self.property_area.label())),
            column("Education_Level", Category(self.education_level.label())),
            column("Gender", Category(self.gender.label())),
            column("Employer_Category", Category(self.employer_category.label())),
        ]
    }
}

const fn column(name: &'static str, value: ColumnValue) -> Column {
    Column { name, value }
}
