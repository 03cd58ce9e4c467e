use super::domain::Application;

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 850;

/// Domain violations detected before any rule is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidApplicationError {
    #[error("annual income must be a positive amount (found {0})")]
    AnnualIncome(f64),
    #[error("credit score must be between 300 and 850 (found {0})")]
    CreditScore(u16),
    #[error("monthly debt must be a non-negative amount (found {0})")]
    MonthlyDebt(f64),
    #[error("loan amount must be a positive amount (found {0})")]
    LoanAmount(f64),
    #[error("property value must be a positive amount (found {0})")]
    PropertyValue(f64),
}

/// Guard enforcing the documented input domain. Checks run in field order and the first
/// violation wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationGuard;

impl ApplicationGuard {
    pub fn validate(&self, application: &Application) -> Result<(), InvalidApplicationError> {
        if !is_positive(application.annual_income) {
            return Err(InvalidApplicationError::AnnualIncome(
                application.annual_income,
            ));
        }

        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&application.credit_score) {
            return Err(InvalidApplicationError::CreditScore(
                application.credit_score,
            ));
        }

        if !(application.monthly_debt.is_finite() && application.monthly_debt >= 0.0) {
            return Err(InvalidApplicationError::MonthlyDebt(application.monthly_debt));
        }

        if !is_positive(application.loan_amount) {
            return Err(InvalidApplicationError::LoanAmount(application.loan_amount));
        }

        if !is_positive(application.property_value) {
            return Err(InvalidApplicationError::PropertyValue(
                application.property_value,
            ));
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
