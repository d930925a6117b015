//! Discharge recommendations and their rationale text.
//!
//! Every recommendation is one variant of [`Outcome`] carrying a closed reason type, so the set of
//! possible results is checked by the compiler. Two renderings are available:
//! - `Display` on a reason gives the short clinical reason (e.g. "oxygen requirement too high.")
//! - [`Outcome::rationale`] gives the full sentence shown to clinicians

use serde::Serialize;
use std::fmt;

/// Why an infant is not safe for discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotSafeReason {
    RecentApneaBradycardia,
    OxygenRequirementTooHigh,
    PoorFeedingTolerance,
    FeedingConcerns,
    ParentNotTrained,
}

/// Why discharge should be reassessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CautionReason {
    LowWeightGain,
}

/// Why a supervised trial is required first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialReason {
    CaregiverCompetencyUncertain,
}

/// Why home NG management is high risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighRiskReason {
    TooFarFromHospital,
}

/// Feeding consideration attached to a safe discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingRisk {
    /// Mostly oral feeding.
    LowRiskOralFeeding,
    /// Tolerating high NG volumes without residuals.
    StableOnNgFeeds,
}

/// Social/environmental consideration attached to a safe discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialRisk {
    HomeNursingSupport,
    ModerateNeedsFollowUp,
}

/// The recommendation produced for one [`crate::ClinicalInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Outcome {
    NotSafe { reason: NotSafeReason },
    Caution { reason: CautionReason },
    RequireSupervisedTrial { reason: TrialReason },
    HighRisk { reason: HighRiskReason },
    SafeWithConsiderations {
        feeding_risk: FeedingRisk,
        social_risk: SocialRisk,
    },
}

impl fmt::Display for NotSafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RecentApneaBradycardia => "recent apnea/bradycardia events.",
            Self::OxygenRequirementTooHigh => "oxygen requirement too high.",
            Self::PoorFeedingTolerance => "poor feeding tolerance.",
            Self::FeedingConcerns => "feeding concerns present.",
            Self::ParentNotTrained => "parent not trained in NG care.",
        })
    }
}

impl fmt::Display for CautionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowWeightGain => f.write_str("weight gain below recommended threshold; reassess."),
        }
    }
}

impl fmt::Display for TrialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaregiverCompetencyUncertain => f.write_str("caregiver competency uncertain."),
        }
    }
}

impl fmt::Display for HighRiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFarFromHospital => {
                f.write_str("distance from hospital too far for safe home NG management.")
            }
        }
    }
}

impl fmt::Display for FeedingRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LowRiskOralFeeding => "low risk for home NG needs",
            Self::StableOnNgFeeds => "stable on NG feeds, consider discharge with monitoring",
        })
    }
}

impl fmt::Display for SocialRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HomeNursingSupport => "lower risk due to home nursing support.",
            Self::ModerateNeedsFollowUp => "moderate risk; ensure follow-up plan.",
        })
    }
}

impl Outcome {
    /// Stable snake_case tag for the variant, used on the wire.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotSafe { .. } => "not_safe",
            Self::Caution { .. } => "caution",
            Self::RequireSupervisedTrial { .. } => "require_supervised_trial",
            Self::HighRisk { .. } => "high_risk",
            Self::SafeWithConsiderations { .. } => "safe_with_considerations",
        }
    }

    /// Short clinical reason for a non-safe outcome; `None` for a safe discharge.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::NotSafe { reason } => Some(reason.to_string()),
            Self::Caution { reason } => Some(reason.to_string()),
            Self::RequireSupervisedTrial { reason } => Some(reason.to_string()),
            Self::HighRisk { reason } => Some(reason.to_string()),
            Self::SafeWithConsiderations { .. } => None,
        }
    }

    /// Returns true only for [`Outcome::SafeWithConsiderations`].
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::SafeWithConsiderations { .. })
    }

    /// The full sentence displayed to the clinician.
    ///
    /// # Example
    ///
    /// ```
    /// use neofeed_core::{NotSafeReason, Outcome};
    ///
    /// let outcome = Outcome::NotSafe { reason: NotSafeReason::OxygenRequirementTooHigh };
    /// assert_eq!(outcome.rationale(), "Not safe for discharge: Oxygen requirement too high.");
    /// ```
    pub fn rationale(&self) -> String {
        match self {
            Self::NotSafe { reason } => {
                let detail = match reason {
                    NotSafeReason::RecentApneaBradycardia => "Recent apnea/bradycardia events.",
                    NotSafeReason::OxygenRequirementTooHigh => "Oxygen requirement too high.",
                    NotSafeReason::PoorFeedingTolerance => "Poor feeding tolerance.",
                    NotSafeReason::FeedingConcerns => "Feeding concerns present.",
                    NotSafeReason::ParentNotTrained => "Parent not trained in NG care.",
                };
                format!("Not safe for discharge: {detail}")
            }
            Self::Caution {
                reason: CautionReason::LowWeightGain,
            } => "Caution: Weight gain below recommended threshold. Reassess.".into(),
            Self::RequireSupervisedTrial {
                reason: TrialReason::CaregiverCompetencyUncertain,
            } => {
                "Require supervised trial before discharge: Caregiver competency uncertain.".into()
            }
            Self::HighRisk {
                reason: HighRiskReason::TooFarFromHospital,
            } => "High risk: Distance from hospital is too far for safe home NG management."
                .into(),
            Self::SafeWithConsiderations {
                feeding_risk,
                social_risk,
            } => {
                let feeding = match feeding_risk {
                    FeedingRisk::LowRiskOralFeeding => "Low risk for home NG needs.",
                    FeedingRisk::StableOnNgFeeds => {
                        "Stable on NG feeds, consider discharge with monitoring."
                    }
                };
                let social = match social_risk {
                    SocialRisk::HomeNursingSupport => "Lower risk due to home nursing support.",
                    SocialRisk::ModerateNeedsFollowUp => "Moderate risk: Ensure follow-up plan.",
                };
                format!("Safe for discharge with considerations. {feeding} {social}")
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rationale())
    }
}
