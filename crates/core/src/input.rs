//! The clinical observations the evaluator works from.

use neofeed_types::{NonNegative, Percentage};
use serde::{Deserialize, Serialize};

use crate::InputContractViolation;

/// A validated set of observations for one infant.
///
/// Every field is already inside its documented range: reals are finite and non-negative and
/// the oral feeding share is a whole percentage. Build one from a [`RawClinicalInput`] with
/// `ClinicalInput::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClinicalInput {
    /// Any apnea or bradycardia event in the last 5 days.
    pub apnea_bradycardia_recent: bool,
    /// Supplemental oxygen flow, LPM.
    pub oxygen_requirement_lpm: NonNegative,
    /// Daily weight gain, g/kg/day.
    pub weight_gain_g_per_kg: NonNegative,
    /// Share of total feeds taken orally.
    pub oral_feed_percentage: Percentage,
    /// Tolerated enteral volume, mL/kg/day.
    pub feeding_tolerance_ml_per_kg: NonNegative,
    /// Significant residuals or emesis.
    pub residuals_or_emesis: bool,
    /// Caregiver completed NG training.
    pub parent_trained: bool,
    /// Caregiver demonstrated competence.
    pub caregiver_competent: bool,
    /// Home nursing support arranged.
    pub home_nursing_available: bool,
    /// Travel time to the nearest capable hospital, hours.
    pub distance_from_hospital_hours: NonNegative,
}

/// Unvalidated form of [`ClinicalInput`], as it arrives from a form, file or request body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClinicalInput {
    pub apnea_bradycardia_recent: bool,
    pub oxygen_requirement_lpm: f64,
    pub weight_gain_g_per_kg: f64,
    pub oral_feed_percentage: i64,
    pub feeding_tolerance_ml_per_kg: f64,
    pub residuals_or_emesis: bool,
    pub parent_trained: bool,
    pub caregiver_competent: bool,
    pub home_nursing_available: bool,
    pub distance_from_hospital_hours: f64,
}

fn quantity(field: &'static str, value: f64) -> Result<NonNegative, InputContractViolation> {
    NonNegative::new(value).map_err(|source| InputContractViolation::Quantity { field, source })
}

impl TryFrom<RawClinicalInput> for ClinicalInput {
    type Error = InputContractViolation;

    /// Checks every field against its range, reporting the first violation in field order.
    fn try_from(raw: RawClinicalInput) -> Result<Self, Self::Error> {
        Ok(Self {
            apnea_bradycardia_recent: raw.apnea_bradycardia_recent,
            oxygen_requirement_lpm: quantity("oxygen_requirement_lpm", raw.oxygen_requirement_lpm)?,
            weight_gain_g_per_kg: quantity("weight_gain_g_per_kg", raw.weight_gain_g_per_kg)?,
            oral_feed_percentage: Percentage::new(raw.oral_feed_percentage).map_err(|source| {
                InputContractViolation::Percentage {
                    field: "oral_feed_percentage",
                    source,
                }
            })?,
            feeding_tolerance_ml_per_kg: quantity(
                "feeding_tolerance_ml_per_kg",
                raw.feeding_tolerance_ml_per_kg,
            )?,
            residuals_or_emesis: raw.residuals_or_emesis,
            parent_trained: raw.parent_trained,
            caregiver_competent: raw.caregiver_competent,
            home_nursing_available: raw.home_nursing_available,
            distance_from_hospital_hours: quantity(
                "distance_from_hospital_hours",
                raw.distance_from_hospital_hours,
            )?,
        })
    }
}

impl From<ClinicalInput> for RawClinicalInput {
    fn from(input: ClinicalInput) -> Self {
        Self {
            apnea_bradycardia_recent: input.apnea_bradycardia_recent,
            oxygen_requirement_lpm: input.oxygen_requirement_lpm.get(),
            weight_gain_g_per_kg: input.weight_gain_g_per_kg.get(),
            oral_feed_percentage: i64::from(input.oral_feed_percentage.get()),
            feeding_tolerance_ml_per_kg: input.feeding_tolerance_ml_per_kg.get(),
            residuals_or_emesis: input.residuals_or_emesis,
            parent_trained: input.parent_trained,
            caregiver_competent: input.caregiver_competent,
            home_nursing_available: input.home_nursing_available,
            distance_from_hospital_hours: input.distance_from_hospital_hours.get(),
        }
    }
}
