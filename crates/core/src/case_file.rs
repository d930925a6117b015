//! Single-case input files.
//!
//! A case file holds the ten observations for one infant as YAML. JSON is accepted too, since it
//! is valid YAML. Keys must match [`RawClinicalInput`] exactly; unknown keys are rejected so a
//! misspelt field cannot silently default.
//!
//! ```yaml
//! apnea_bradycardia_recent: false
//! oxygen_requirement_lpm: 0.05
//! weight_gain_g_per_kg: 20
//! oral_feed_percentage: 85
//! feeding_tolerance_ml_per_kg: 100
//! residuals_or_emesis: false
//! parent_trained: true
//! caregiver_competent: true
//! home_nursing_available: true
//! distance_from_hospital_hours: 1
//! ```

use std::path::Path;

use crate::{ClinicalInput, CoreError, CoreResult, RawClinicalInput};

/// Parse a case from YAML (or JSON) text and validate it.
///
/// # Errors
///
/// Returns [`CoreError::CaseSchema`] with the failing field path when the text does not match the
/// schema, and [`CoreError::InvalidInput`] when a value is outside its documented range.
pub fn parse(yaml_text: &str) -> CoreResult<ClinicalInput> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    let raw = match serde_path_to_error::deserialize::<_, RawClinicalInput>(deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            return Err(CoreError::CaseSchema {
                path,
                message: source.to_string(),
            });
        }
    };

    Ok(ClinicalInput::try_from(raw)?)
}

/// Read and parse a case file from disk.
///
/// # Errors
///
/// Returns [`CoreError::FileRead`] if the file cannot be read, otherwise as [`parse`].
pub fn load(path: &Path) -> CoreResult<ClinicalInput> {
    let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
    tracing::debug!("loaded case file: {}", path.display());
    parse(&text)
}
