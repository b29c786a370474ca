use clap::Args;
use lead_intent::config::AppConfig;
use lead_intent::error::AppError;
use lead_intent::telemetry;
use lead_intent::workflows::leads::{
    run_pipeline, write_results_csv, ChatCompletionClassifier, IntentClassifier, LeadCsvImporter,
    Offer, ScoreResult,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Offer name used in the classifier prompt
    #[arg(long)]
    pub(crate) offer_name: String,
    /// Value proposition (repeat for several)
    #[arg(long = "value-prop")]
    pub(crate) value_props: Vec<String>,
    /// Ideal use case or target industry (repeat for several)
    #[arg(long = "use-case")]
    pub(crate) use_cases: Vec<String>,
    /// Lead CSV with name, role, company, industry, location, linkedin_bio columns
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Write results to this CSV instead of printing a table
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn offer(&self) -> Offer {
        Offer {
            name: self.offer_name.clone(),
            value_props: self.value_props.clone(),
            ideal_use_cases: self.use_cases.clone(),
        }
    }
}

/// Runs on a blocking thread: the classifier performs synchronous HTTP calls.
pub(crate) fn run_offline_scoring(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let classifier = ChatCompletionClassifier::new(config.classifier);
    if !classifier.is_configured() {
        println!("GROQ_API_KEY not set; AI intent defaults to Low for every lead.");
    }

    let results = score_file(&args.offer(), &args.leads, &classifier)?;

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_results_csv(BufWriter::new(file), &results)?;
            println!("Wrote {} scored leads to {}", results.len(), path.display());
        }
        None => print!("{}", render_table(&results)),
    }
    Ok(())
}

pub(crate) fn score_file(
    offer: &Offer,
    leads_path: &Path,
    classifier: &dyn IntentClassifier,
) -> Result<Vec<ScoreResult>, AppError> {
    let leads = LeadCsvImporter::from_path(leads_path)?;
    Ok(run_pipeline(offer, &leads, classifier))
}

pub(crate) fn render_table(results: &[ScoreResult]) -> String {
    let name_width = results
        .iter()
        .map(|result| result.name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or_default();

    let mut table = format!(
        "{:<name_width$}  {:<6}  {:>5}  Reasoning\n",
        "Name", "Intent", "Score"
    );
    for result in results {
        table.push_str(&format!(
            "{:<name_width$}  {:<6}  {:>5}  {}\n",
            result.name,
            result.intent.label(),
            result.score,
            result.reasoning
        ));
    }
    table
}
