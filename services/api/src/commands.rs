use crate::infra::build_underwriting_service;
use clap::Args;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use underwriter::config::AppConfig;
use underwriter::error::AppError;
use underwriter::workflows::underwriting::{
    Application, BatchUnderwriter, EvaluationProfile,
};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file containing a single application
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Skip the risk model and attach only the rule rationale
    #[arg(long)]
    pub(crate) rules_only: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one application per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination CSV for results (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Skip the risk model and attach only the rule rationale
    #[arg(long)]
    pub(crate) rules_only: bool,
}

fn selected_profile(configured: EvaluationProfile, rules_only: bool) -> EvaluationProfile {
    if rules_only {
        EvaluationProfile::RulesOnly
    } else {
        configured
    }
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_underwriting_service(&config.underwriting)?;
    let profile = selected_profile(service.profile(), args.rules_only);

    let raw = fs::read_to_string(&args.input)?;
    let application: Application = serde_json::from_str(&raw)?;
    let decision = service.underwrite_with(&application, profile)?;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_underwriting_service(&config.underwriting)?;
    let profile = selected_profile(service.profile(), args.rules_only);
    let batch = BatchUnderwriter::new(&service, profile);

    let reader = BufReader::new(File::open(&args.input)?);
    let summary = match &args.output {
        Some(path) => batch.run(reader, BufWriter::new(File::create(path)?))?,
        None => batch.run(reader, io::stdout().lock())?,
    };

    eprintln!(
        "Processed {} application(s): {} approved, {} referred, {} denied, {} invalid",
        summary.processed, summary.approved, summary.referred, summary.denied, summary.invalid
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_only_flag_overrides_configured_profile() {
        assert_eq!(
            selected_profile(EvaluationProfile::RulesWithModel, true),
            EvaluationProfile::RulesOnly
        );
        assert_eq!(
            selected_profile(EvaluationProfile::RulesWithModel, false),
            EvaluationProfile::RulesWithModel
        );
    }
}
