//! Interactive discharge form.
//!
//! Asks the ten questions in the order a clinician fills in the bedside form. Answers are
//! range-checked at the prompt, so the resulting [`RawClinicalInput`] always validates.

use dialoguer::{Input, Select};
use neofeed_core::RawClinicalInput;

/// Source of answers for the form.
pub trait Prompter {
    /// A Yes/No question.
    fn yes_no(&mut self, question: &str) -> anyhow::Result<bool>;
    /// A finite real number of zero or more.
    fn non_negative(&mut self, question: &str) -> anyhow::Result<f64>;
    /// A whole number in 0..=100.
    fn percentage(&mut self, question: &str) -> anyhow::Result<i64>;
}

/// Terminal prompts backed by `dialoguer`.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn yes_no(&mut self, question: &str) -> anyhow::Result<bool> {
        let choice = Select::new()
            .with_prompt(question)
            .items(&["Yes", "No"])
            .default(0)
            .interact()?;
        Ok(choice == 0)
    }

    fn non_negative(&mut self, question: &str) -> anyhow::Result<f64> {
        let value = Input::<f64>::new()
            .with_prompt(question)
            .default(0.0)
            .validate_with(|v: &f64| -> Result<(), &'static str> {
                if v.is_finite() && *v >= 0.0 {
                    Ok(())
                } else {
                    Err("enter a number of zero or more")
                }
            })
            .interact_text()?;
        Ok(value)
    }

    fn percentage(&mut self, question: &str) -> anyhow::Result<i64> {
        let value = Input::<i64>::new()
            .with_prompt(question)
            .default(0)
            .validate_with(|v: &i64| -> Result<(), &'static str> {
                if (0..=100).contains(v) {
                    Ok(())
                } else {
                    Err("enter a whole number between 0 and 100")
                }
            })
            .interact_text()?;
        Ok(value)
    }
}

/// Run the form and collect one set of observations.
pub fn ask_clinical_input(prompter: &mut impl Prompter) -> anyhow::Result<RawClinicalInput> {
    Ok(RawClinicalInput {
        apnea_bradycardia_recent: prompter
            .yes_no("Has the baby had apnea/bradycardia in the last 5 days?")?,
        oxygen_requirement_lpm: prompter.non_negative("Enter oxygen requirement in LPM")?,
        weight_gain_g_per_kg: prompter.non_negative("Enter weight gain in g/kg/day")?,
        oral_feed_percentage: prompter.percentage("Enter oral feeding percentage")?,
        feeding_tolerance_ml_per_kg: prompter
            .non_negative("Enter feeding tolerance in mL/kg/day")?,
        residuals_or_emesis: prompter.yes_no("Is there significant residuals or emesis?")?,
        parent_trained: prompter.yes_no("Has the parent been trained in NG care?")?,
        caregiver_competent: prompter.yes_no("Is the caregiver competent in NG feeding?")?,
        home_nursing_available: prompter.yes_no("Is home nursing available?")?,
        distance_from_hospital_hours: prompter
            .non_negative("Enter distance from hospital in hours")?,
    })
}
