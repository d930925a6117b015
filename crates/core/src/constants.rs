//! Clinical thresholds used by the discharge rule chain.
//!
//! Comparison direction is part of each rule, not of the constant: see [`crate::evaluator`].

/// Oxygen flow above this (LPM) is not safe for discharge.
pub const MAX_OXYGEN_LPM: f64 = 0.1;

/// Daily weight gain (g/kg/day) below this triggers a caution.
pub const MIN_WEIGHT_GAIN_G_PER_KG: f64 = 15.0;

/// Oral feeding at or above this percentage means low risk for home NG needs.
pub const LOW_RISK_ORAL_FEED_PERCENTAGE: u8 = 80;

/// Oral feeding below this percentage, with residuals or emesis, is poor tolerance.
pub const POOR_ORAL_FEED_PERCENTAGE: u8 = 50;

/// Enteral volume (mL/kg/day) above this counts as stable on NG feeds.
pub const STABLE_NG_TOLERANCE_ML_PER_KG: f64 = 120.0;

/// Without home nursing, travel time (hours) above this is high risk.
pub const MAX_DISTANCE_FROM_HOSPITAL_HOURS: f64 = 2.0;
