use super::super::domain::{Application, EmploymentStatus, ScoreResult, ScoreSignals};

const SUBPRIME_CREDIT_CEILING: u16 = 600;
const PRIME_CREDIT_FLOOR: u16 = 700;
const MAX_LOAN_TO_VALUE: f64 = 0.8;
const MAX_DEBT_TO_INCOME: f64 = 0.4;
const MIN_DOWN_PAYMENT: f64 = 20_000.0;

/// Accumulates reasons and approval factors in rule evaluation order.
#[derive(Default)]
struct Tally {
    risk_score: u32,
    reasons: Vec<String>,
    approval_factors: Vec<String>,
}

impl Tally {
    fn penalize(&mut self, points: u32, reason: &str) {
        self.risk_score += points;
        self.reasons.push(reason.to_string());
    }

    fn credit(&mut self, factor: &str) {
        self.approval_factors.push(factor.to_string());
    }
}

pub(crate) fn derive_signals(application: &Application) -> ScoreSignals {
    ScoreSignals {
        loan_to_value: application.loan_amount / application.property_value,
        debt_to_income: application.monthly_debt / application.monthly_income(),
        down_payment: application.property_value - application.loan_amount,
    }
}

/// Apply the additive rule table. Groups are evaluated credit, loan-to-value,
/// debt-to-income, down payment, employment; reason order follows that sequence.
pub(crate) fn score_application(application: &Application) -> ScoreResult {
    let signals = derive_signals(application);
    let mut tally = Tally::default();

    if application.credit_score < SUBPRIME_CREDIT_CEILING {
        tally.penalize(50, "Credit score below 600");
    } else if application.credit_score < PRIME_CREDIT_FLOOR {
        tally.penalize(20, "credit score between 600 and 699");
    } else {
        tally.credit("Strong credit score");
    }

    if signals.loan_to_value > MAX_LOAN_TO_VALUE {
        tally.penalize(30, "High loan-to-value ratio");
    } else {
        tally.credit("Conservative loan-to-value ratio");
    }

    if signals.debt_to_income > MAX_DEBT_TO_INCOME {
        tally.penalize(20, "High debt to income ratio");
    } else {
        tally.credit("Low debt to income ratio");
    }

    // No offsetting factor for a large down payment.
    if signals.down_payment < MIN_DOWN_PAYMENT {
        tally.penalize(10, "Down payment less than $20,000");
    }

    match application.employment_status {
        EmploymentStatus::Unemployed => tally.penalize(15, "unemployed applicant"),
        EmploymentStatus::SelfEmployed => {
            tally.penalize(5, "Self-employed applicant-income stability uncertain")
        }
        EmploymentStatus::Employed => tally.credit("Stable employment"),
    }

    ScoreResult {
        risk_score: tally.risk_score,
        reasons: tally.reasons,
        approval_factors: tally.approval_factors,
        signals,
    }
}
