use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use neofeed_core::{assess, case_file, Assessment, ClinicalInput, Outcome, RawClinicalInput};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod prompt;

#[derive(Parser)]
#[command(name = "neofeed")]
#[command(about = "NICU NG tube discharge readiness")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one infant from command-line values
    Evaluate {
        #[command(flatten)]
        input: InputArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate one infant from a YAML or JSON case file
    EvaluateFile {
        /// Path to the case file
        path: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill in the discharge form interactively
    Interactive {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Any apnea/bradycardia event in the last 5 days (true/false)
    #[arg(long, action = ArgAction::Set)]
    apnea_bradycardia_recent: bool,
    /// Oxygen requirement in LPM
    #[arg(long, allow_negative_numbers = true)]
    oxygen_requirement_lpm: f64,
    /// Weight gain in g/kg/day
    #[arg(long, allow_negative_numbers = true)]
    weight_gain_g_per_kg: f64,
    /// Oral feeding percentage (0-100)
    #[arg(long, allow_negative_numbers = true)]
    oral_feed_percentage: i64,
    /// Feeding tolerance in mL/kg/day
    #[arg(long, allow_negative_numbers = true)]
    feeding_tolerance_ml_per_kg: f64,
    /// Significant residuals or emesis (true/false)
    #[arg(long, action = ArgAction::Set)]
    residuals_or_emesis: bool,
    /// Parent trained in NG care (true/false)
    #[arg(long, action = ArgAction::Set)]
    parent_trained: bool,
    /// Caregiver competent in NG feeding (true/false)
    #[arg(long, action = ArgAction::Set)]
    caregiver_competent: bool,
    /// Home nursing available (true/false)
    #[arg(long, action = ArgAction::Set)]
    home_nursing_available: bool,
    /// Distance from hospital in hours
    #[arg(long, allow_negative_numbers = true)]
    distance_from_hospital_hours: f64,
}

impl From<InputArgs> for RawClinicalInput {
    fn from(args: InputArgs) -> Self {
        Self {
            apnea_bradycardia_recent: args.apnea_bradycardia_recent,
            oxygen_requirement_lpm: args.oxygen_requirement_lpm,
            weight_gain_g_per_kg: args.weight_gain_g_per_kg,
            oral_feed_percentage: args.oral_feed_percentage,
            feeding_tolerance_ml_per_kg: args.feeding_tolerance_ml_per_kg,
            residuals_or_emesis: args.residuals_or_emesis,
            parent_trained: args.parent_trained,
            caregiver_competent: args.caregiver_competent,
            home_nursing_available: args.home_nursing_available,
            distance_from_hospital_hours: args.distance_from_hospital_hours,
        }
    }
}

/// JSON form of a result.
#[derive(serde::Serialize)]
struct Report {
    category: &'static str,
    rationale: String,
    decided_by: &'static str,
    outcome: Outcome,
}

impl From<Assessment> for Report {
    fn from(assessment: Assessment) -> Self {
        Self {
            category: assessment.outcome.category(),
            rationale: assessment.outcome.rationale(),
            decided_by: assessment.decided_by,
            outcome: assessment.outcome,
        }
    }
}

fn render(input: &ClinicalInput, json: bool) -> anyhow::Result<String> {
    let assessment = assess(input);
    tracing::debug!(
        category = assessment.outcome.category(),
        decided_by = assessment.decided_by,
        "discharge evaluated"
    );

    if json {
        Ok(serde_json::to_string_pretty(&Report::from(assessment))?)
    } else {
        Ok(assessment.outcome.rationale())
    }
}

/// `RUST_LOG` plus warn-level directives for this binary and the core crate it drives.
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("neofeed=warn".parse()?)
        .add_directive("neofeed_core=warn".parse()?))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the result.
    tracing_subscriber::registry()
        .with(log_filter()?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Evaluate { input, json }) => {
            let input = ClinicalInput::try_from(RawClinicalInput::from(input))?;
            println!("{}", render(&input, json)?);
        }
        Some(Commands::EvaluateFile { path, json }) => {
            let input = case_file::load(&path)?;
            println!("{}", render(&input, json)?);
        }
        Some(Commands::Interactive { json }) => {
            let raw = prompt::ask_clinical_input(&mut prompt::TerminalPrompter)?;
            let input = ClinicalInput::try_from(raw)?;
            println!("{}", render(&input, json)?);
        }
        None => {
            println!("Use 'neofeed --help' for commands");
        }
    }

    Ok(())
}
