//! Discharge evaluation shared by the REST and gRPC APIs.
//!
//! Translates the wire request into a validated [`ClinicalInput`], runs the rule chain and builds
//! the wire response. Nothing is stored: the generated `evaluation_id` only ties log lines to the
//! response the caller received.

use chrono::{SecondsFormat, Utc};
use neofeed_core::{
    assess, Assessment, ClinicalInput, InputContractViolation, Outcome, RawClinicalInput,
};

use crate::pb::{EvaluateDischargeReq, EvaluateDischargeRes};

/// Stateless evaluation service.
#[derive(Clone, Default)]
pub struct EvaluationService;

impl EvaluationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate the request and evaluate it.
    ///
    /// # Errors
    ///
    /// Returns [`InputContractViolation`] if any field is outside its documented range. Unsafe
    /// recommendations are normal responses, not errors.
    pub fn evaluate(
        &self,
        req: EvaluateDischargeReq,
    ) -> Result<EvaluateDischargeRes, InputContractViolation> {
        let input = ClinicalInput::try_from(raw_input(&req)).inspect_err(|violation| {
            tracing::warn!("rejected evaluation request: {}", violation);
        })?;

        let assessment = assess(&input);
        let evaluation_id = uuid::Uuid::new_v4().simple().to_string();

        tracing::info!(
            evaluation_id = %evaluation_id,
            category = assessment.outcome.category(),
            decided_by = assessment.decided_by,
            "discharge evaluated"
        );

        Ok(to_response(
            evaluation_id,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            assessment,
        ))
    }
}

fn raw_input(req: &EvaluateDischargeReq) -> RawClinicalInput {
    RawClinicalInput {
        apnea_bradycardia_recent: req.apnea_bradycardia_recent,
        oxygen_requirement_lpm: req.oxygen_requirement_lpm,
        weight_gain_g_per_kg: req.weight_gain_g_per_kg,
        oral_feed_percentage: i64::from(req.oral_feed_percentage),
        feeding_tolerance_ml_per_kg: req.feeding_tolerance_ml_per_kg,
        residuals_or_emesis: req.residuals_or_emesis,
        parent_trained: req.parent_trained,
        caregiver_competent: req.caregiver_competent,
        home_nursing_available: req.home_nursing_available,
        distance_from_hospital_hours: req.distance_from_hospital_hours,
    }
}

fn to_response(
    evaluation_id: String,
    evaluated_at: String,
    assessment: Assessment,
) -> EvaluateDischargeRes {
    let outcome = assessment.outcome;
    let (feeding_risk, social_risk) = match outcome {
        Outcome::SafeWithConsiderations {
            feeding_risk,
            social_risk,
        } => (feeding_risk.to_string(), social_risk.to_string()),
        _ => (String::new(), String::new()),
    };

    EvaluateDischargeRes {
        evaluation_id,
        evaluated_at,
        category: outcome.category().to_string(),
        rationale: outcome.rationale(),
        reason: outcome.reason().unwrap_or_default(),
        feeding_risk,
        social_risk,
        decided_by: assessment.decided_by.to_string(),
    }
}
