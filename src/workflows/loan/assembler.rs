use super::domain::ApplicationRecord;
use super::form::LoanApplicationForm;

/// The classifiers expect an `Applicant_ID` column that carries no information.
pub const APPLICANT_ID_PLACEHOLDER: f64 = 0.0;

/// Builds the model input row from collected form values.
pub fn assemble(form: &LoanApplicationForm) -> ApplicationRecord {
    ApplicationRecord {
        applicant_id: APPLICANT_ID_PLACEHOLDER,
        applicant_income: form.applicant_income,
        coapplicant_income: form.coapplicant_income,
        employment_status: form.employment_status,
        age: form.age,
        marital_status: form.marital_status,
        dependents: f64::from(form.dependents),
        credit_score: i64::from(form.credit_score),
        existing_loans: f64::from(form.existing_loans),
        dti_ratio: form.dti_ratio,
        savings: form.savings,
        collateral_value: form.collateral_value,
        loan_amount: form.loan_amount,
        loan_term: form.loan_term,
        loan_purpose: form.loan_purpose,
        property_area: form.property_area,
        education_level: form.education_level,
        gender: form.gender,
        employer_category: form.employer_category,
    }
}
