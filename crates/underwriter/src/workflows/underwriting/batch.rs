//! CSV batch underwriting.
//!
//! Each input row is an application with the same column names as the JSON payload.
//! Rows that fail to parse or validate are reported inline and the batch continues;
//! a failing model collaborator aborts the batch because every later row would fail too.

use std::io::{Read, Write};

use serde::Serialize;

use super::domain::{Application, DecisionState};
use super::engine::UnderwritingError;
use super::model::{AttributionExplainer, RiskPredictor};
use super::service::{EvaluationProfile, UnderwritingService};

#[derive(Debug)]
pub enum BatchError {
    Csv(csv::Error),
    Io(std::io::Error),
    Underwriting { row: usize, source: UnderwritingError },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Csv(err) => write!(f, "invalid application CSV data: {}", err),
            BatchError::Io(err) => write!(f, "failed to write batch results: {}", err),
            BatchError::Underwriting { row, source } => {
                write!(f, "batch aborted at row {}: {}", row, source)
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Csv(err) => Some(err),
            BatchError::Io(err) => Some(err),
            BatchError::Underwriting { source, .. } => Some(source),
        }
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Counts per outcome for a completed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub approved: usize,
    pub referred: usize,
    pub denied: usize,
    pub invalid: usize,
}

impl BatchSummary {
    fn record(&mut self, state: DecisionState) {
        match state {
            DecisionState::Approved => self.approved += 1,
            DecisionState::Refer => self.referred += 1,
            DecisionState::Denied => self.denied += 1,
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchResultRow {
    row: usize,
    decision: &'static str,
    risk_score: Option<u32>,
    reasons: String,
    conditions: String,
    ml_default_probability: Option<f64>,
    error: Option<String>,
}

impl BatchResultRow {
    fn invalid(row: usize, message: String) -> Self {
        Self {
            row,
            decision: "invalid",
            risk_score: None,
            reasons: String::new(),
            conditions: String::new(),
            ml_default_probability: None,
            error: Some(message),
        }
    }
}

pub struct BatchUnderwriter<'a, P, E> {
    service: &'a UnderwritingService<P, E>,
    profile: EvaluationProfile,
}

impl<'a, P, E> BatchUnderwriter<'a, P, E>
where
    P: RiskPredictor + 'static,
    E: AttributionExplainer + 'static,
{
    pub fn new(service: &'a UnderwritingService<P, E>, profile: EvaluationProfile) -> Self {
        Self { service, profile }
    }

    pub fn run<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<BatchSummary, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut summary = BatchSummary::default();

        for (index, record) in csv_reader.deserialize::<Application>().enumerate() {
            let row = index + 1;
            summary.processed += 1;

            let application = match record {
                Ok(application) => application,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                    summary.invalid += 1;
                    csv_writer.serialize(BatchResultRow::invalid(row, err.to_string()))?;
                    continue;
                }
                Err(err) => return Err(BatchError::Csv(err)),
            };

            let result_row = match self.service.underwrite_with(&application, self.profile) {
                Ok(decision) => {
                    summary.record(decision.decision);
                    BatchResultRow {
                        row,
                        decision: decision.decision.label(),
                        risk_score: Some(decision.risk_score),
                        reasons: decision.reasons.join("; "),
                        conditions: decision.conditions.join("; "),
                        ml_default_probability: decision.ml_risk_score,
                        error: None,
                    }
                }
                Err(UnderwritingError::InvalidApplication(err)) => {
                    summary.invalid += 1;
                    BatchResultRow::invalid(row, err.to_string())
                }
                Err(source) => return Err(BatchError::Underwriting { row, source }),
            };
            csv_writer.serialize(result_row)?;
        }

        csv_writer.flush()?;
        Ok(summary)
    }
}
