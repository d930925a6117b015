//! The discharge rule chain.
//!
//! Rules are grouped into four tiers that run in a fixed order:
//! 1. clinical stability
//! 2. feeding tolerance
//! 3. parental readiness
//! 4. social/environmental risk
//!
//! Each tier is a table of rows checked top to bottom. The first row whose predicate holds
//! decides the tier; if none holds, the tier's `otherwise` branch applies. A branch either
//! stops the chain with an [`Outcome`] or records a note and moves on to the next tier. Every
//! tier has an `otherwise`, so every input produces exactly one outcome.
//!
//! Evaluation is pure: no I/O, no logging, no shared state.

use serde::Serialize;

use crate::constants::{
    LOW_RISK_ORAL_FEED_PERCENTAGE, MAX_DISTANCE_FROM_HOSPITAL_HOURS, MAX_OXYGEN_LPM,
    MIN_WEIGHT_GAIN_G_PER_KG, POOR_ORAL_FEED_PERCENTAGE, STABLE_NG_TOLERANCE_ML_PER_KG,
};
use crate::outcome::{
    CautionReason, FeedingRisk, HighRiskReason, NotSafeReason, Outcome, SocialRisk, TrialReason,
};
use crate::ClinicalInput;

/// An outcome together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub outcome: Outcome,
    /// Stable rule name, e.g. `feeding.poor_tolerance`.
    pub decided_by: &'static str,
}

/// What a matching row does.
#[derive(Debug, Clone, Copy)]
enum Branch<N> {
    Stop(Outcome),
    Note(N),
}

struct Rule<N> {
    name: &'static str,
    when: fn(&ClinicalInput) -> bool,
    then: Branch<N>,
}

struct Tier<N: 'static> {
    rules: &'static [Rule<N>],
    otherwise: Rule<N>,
}

impl<N: Copy + 'static> Tier<N> {
    fn apply(&self, input: &ClinicalInput) -> Result<N, Assessment> {
        let rule = self
            .rules
            .iter()
            .find(|rule| (rule.when)(input))
            .unwrap_or(&self.otherwise);

        match rule.then {
            Branch::Note(note) => Ok(note),
            Branch::Stop(outcome) => Err(Assessment {
                outcome,
                decided_by: rule.name,
            }),
        }
    }
}

const fn not_safe<N>(reason: NotSafeReason) -> Branch<N> {
    Branch::Stop(Outcome::NotSafe { reason })
}

fn always(_: &ClinicalInput) -> bool {
    true
}

static STABILITY: Tier<()> = Tier {
    rules: &[
        Rule {
            name: "stability.apnea_bradycardia",
            when: |i| i.apnea_bradycardia_recent,
            then: not_safe(NotSafeReason::RecentApneaBradycardia),
        },
        Rule {
            name: "stability.oxygen_requirement",
            when: |i| i.oxygen_requirement_lpm.get() > MAX_OXYGEN_LPM,
            then: not_safe(NotSafeReason::OxygenRequirementTooHigh),
        },
        // Terminal: a caution never falls through to the feeding checks.
        Rule {
            name: "stability.weight_gain",
            when: |i| i.weight_gain_g_per_kg.get() < MIN_WEIGHT_GAIN_G_PER_KG,
            then: Branch::Stop(Outcome::Caution {
                reason: CautionReason::LowWeightGain,
            }),
        },
    ],
    otherwise: Rule {
        name: "stability.stable",
        when: always,
        then: Branch::Note(()),
    },
};

static FEEDING: Tier<FeedingRisk> = Tier {
    rules: &[
        Rule {
            name: "feeding.mostly_oral",
            when: |i| i.oral_feed_percentage.get() >= LOW_RISK_ORAL_FEED_PERCENTAGE,
            then: Branch::Note(FeedingRisk::LowRiskOralFeeding),
        },
        Rule {
            name: "feeding.poor_tolerance",
            when: |i| {
                i.oral_feed_percentage.get() < POOR_ORAL_FEED_PERCENTAGE && i.residuals_or_emesis
            },
            then: not_safe(NotSafeReason::PoorFeedingTolerance),
        },
        Rule {
            name: "feeding.stable_on_ng",
            when: |i| {
                i.feeding_tolerance_ml_per_kg.get() > STABLE_NG_TOLERANCE_ML_PER_KG
                    && !i.residuals_or_emesis
            },
            then: Branch::Note(FeedingRisk::StableOnNgFeeds),
        },
    ],
    otherwise: Rule {
        name: "feeding.concerns",
        when: always,
        then: not_safe(NotSafeReason::FeedingConcerns),
    },
};

static READINESS: Tier<()> = Tier {
    rules: &[
        Rule {
            name: "readiness.parent_not_trained",
            when: |i| !i.parent_trained,
            then: not_safe(NotSafeReason::ParentNotTrained),
        },
        Rule {
            name: "readiness.caregiver_competency",
            when: |i| !i.caregiver_competent,
            then: Branch::Stop(Outcome::RequireSupervisedTrial {
                reason: TrialReason::CaregiverCompetencyUncertain,
            }),
        },
    ],
    otherwise: Rule {
        name: "readiness.ready",
        when: always,
        then: Branch::Note(()),
    },
};

static SOCIAL: Tier<SocialRisk> = Tier {
    rules: &[
        Rule {
            name: "social.home_nursing",
            when: |i| i.home_nursing_available,
            then: Branch::Note(SocialRisk::HomeNursingSupport),
        },
        Rule {
            name: "social.distance",
            when: |i| i.distance_from_hospital_hours.get() > MAX_DISTANCE_FROM_HOSPITAL_HOURS,
            then: Branch::Stop(Outcome::HighRisk {
                reason: HighRiskReason::TooFarFromHospital,
            }),
        },
    ],
    otherwise: Rule {
        name: "social.follow_up",
        when: always,
        then: Branch::Note(SocialRisk::ModerateNeedsFollowUp),
    },
};

const SAFE_WITH_CONSIDERATIONS: &str = "social.safe_with_considerations";

// Err carries the assessment of the tier that stopped the chain.
fn run(input: &ClinicalInput) -> Result<Assessment, Assessment> {
    STABILITY.apply(input)?;
    let feeding_risk = FEEDING.apply(input)?;
    READINESS.apply(input)?;
    let social_risk = SOCIAL.apply(input)?;

    Ok(Assessment {
        outcome: Outcome::SafeWithConsiderations {
            feeding_risk,
            social_risk,
        },
        decided_by: SAFE_WITH_CONSIDERATIONS,
    })
}

/// Runs the rule chain and reports which rule decided the outcome.
pub fn assess(input: &ClinicalInput) -> Assessment {
    run(input).unwrap_or_else(|stopped| stopped)
}

/// Maps a validated input to its discharge recommendation.
///
/// Total and deterministic: every `ClinicalInput` yields exactly one [`Outcome`], and identical
/// inputs always yield identical outcomes.
pub fn evaluate(input: &ClinicalInput) -> Outcome {
    assess(input).outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawClinicalInput;

    /// Mostly oral feeder with home nursing; clears every tier.
    fn baseline() -> RawClinicalInput {
        RawClinicalInput {
            apnea_bradycardia_recent: false,
            oxygen_requirement_lpm: 0.05,
            weight_gain_g_per_kg: 20.0,
            oral_feed_percentage: 85,
            feeding_tolerance_ml_per_kg: 100.0,
            residuals_or_emesis: false,
            parent_trained: true,
            caregiver_competent: true,
            home_nursing_available: true,
            distance_from_hospital_hours: 1.0,
        }
    }

    fn eval(raw: RawClinicalInput) -> Outcome {
        evaluate(&ClinicalInput::try_from(raw).expect("test input must be valid"))
    }

    fn decided_by(raw: RawClinicalInput) -> &'static str {
        assess(&ClinicalInput::try_from(raw).unwrap()).decided_by
    }

    #[test]
    fn test_mostly_oral_with_home_nursing_is_safe() {
        let outcome = eval(baseline());
        assert_eq!(
            outcome,
            Outcome::SafeWithConsiderations {
                feeding_risk: FeedingRisk::LowRiskOralFeeding,
                social_risk: SocialRisk::HomeNursingSupport,
            }
        );
        assert_eq!(
            outcome.rationale(),
            "Safe for discharge with considerations. Low risk for home NG needs. Lower risk due to home nursing support."
        );
        assert_eq!(decided_by(baseline()), "social.safe_with_considerations");
    }

    #[test]
    fn test_low_oral_share_with_residuals_is_poor_tolerance() {
        let raw = RawClinicalInput {
            oral_feed_percentage: 40,
            feeding_tolerance_ml_per_kg: 50.0,
            residuals_or_emesis: true,
            ..baseline()
        };
        let outcome = eval(raw);
        assert_eq!(
            outcome,
            Outcome::NotSafe {
                reason: NotSafeReason::PoorFeedingTolerance
            }
        );
        assert_eq!(outcome.reason().as_deref(), Some("poor feeding tolerance."));

        // Later tiers cannot change it.
        for parent_trained in [true, false] {
            for home_nursing_available in [true, false] {
                let raw = RawClinicalInput {
                    parent_trained,
                    caregiver_competent: false,
                    home_nursing_available,
                    distance_from_hospital_hours: 9.0,
                    ..raw
                };
                assert_eq!(eval(raw), outcome);
            }
        }
    }

    #[test]
    fn test_oxygen_requirement_too_high() {
        let outcome = eval(RawClinicalInput {
            oxygen_requirement_lpm: 0.2,
            ..baseline()
        });
        assert_eq!(outcome.reason().as_deref(), Some("oxygen requirement too high."));
        assert_eq!(
            outcome.rationale(),
            "Not safe for discharge: Oxygen requirement too high."
        );
    }

    #[test]
    fn test_low_weight_gain_is_terminal_caution() {
        let outcome = eval(RawClinicalInput {
            weight_gain_g_per_kg: 10.0,
            ..baseline()
        });
        assert_eq!(
            outcome,
            Outcome::Caution {
                reason: CautionReason::LowWeightGain
            }
        );
        assert_eq!(
            outcome.rationale(),
            "Caution: Weight gain below recommended threshold. Reassess."
        );

        // Caution wins even over inputs that would otherwise fail feeding or readiness.
        let outcome = eval(RawClinicalInput {
            weight_gain_g_per_kg: 10.0,
            oral_feed_percentage: 10,
            residuals_or_emesis: true,
            parent_trained: false,
            ..baseline()
        });
        assert!(matches!(outcome, Outcome::Caution { .. }));
    }

    #[test]
    fn test_distance_too_far_without_home_nursing() {
        let raw = RawClinicalInput {
            oral_feed_percentage: 90,
            home_nursing_available: false,
            distance_from_hospital_hours: 3.0,
            ..baseline()
        };
        let outcome = eval(raw);
        assert_eq!(
            outcome,
            Outcome::HighRisk {
                reason: HighRiskReason::TooFarFromHospital
            }
        );
        assert_eq!(
            outcome.reason().as_deref(),
            Some("distance from hospital too far for safe home NG management.")
        );
        assert_eq!(
            outcome.rationale(),
            "High risk: Distance from hospital is too far for safe home NG management."
        );
        assert_eq!(decided_by(raw), "social.distance");
    }

    #[test]
    fn test_apnea_always_not_safe() {
        for raw in boundary_grid() {
            let raw = RawClinicalInput {
                apnea_bradycardia_recent: true,
                ..raw
            };
            assert_eq!(
                eval(raw),
                Outcome::NotSafe {
                    reason: NotSafeReason::RecentApneaBradycardia
                }
            );
        }
    }

    #[test]
    fn test_untrained_parent_not_safe_regardless_of_social_fields() {
        for caregiver_competent in [true, false] {
            for home_nursing_available in [true, false] {
                for distance_from_hospital_hours in [0.0, 2.0, 2.0001, 12.0] {
                    let raw = RawClinicalInput {
                        parent_trained: false,
                        caregiver_competent,
                        home_nursing_available,
                        distance_from_hospital_hours,
                        ..baseline()
                    };
                    let outcome = eval(raw);
                    assert_eq!(
                        outcome.reason().as_deref(),
                        Some("parent not trained in NG care.")
                    );
                    assert_eq!(decided_by(raw), "readiness.parent_not_trained");
                }
            }
        }
    }

    #[test]
    fn test_caregiver_competency_requires_supervised_trial() {
        let outcome = eval(RawClinicalInput {
            caregiver_competent: false,
            ..baseline()
        });
        assert_eq!(
            outcome,
            Outcome::RequireSupervisedTrial {
                reason: TrialReason::CaregiverCompetencyUncertain
            }
        );
        assert_eq!(
            outcome.rationale(),
            "Require supervised trial before discharge: Caregiver competency uncertain."
        );
    }

    #[test]
    fn test_oxygen_boundary() {
        let at = eval(RawClinicalInput {
            oxygen_requirement_lpm: 0.1,
            ..baseline()
        });
        assert!(at.is_safe());

        let above = eval(RawClinicalInput {
            oxygen_requirement_lpm: 0.1001,
            ..baseline()
        });
        assert_eq!(
            above,
            Outcome::NotSafe {
                reason: NotSafeReason::OxygenRequirementTooHigh
            }
        );
    }

    #[test]
    fn test_weight_gain_boundary() {
        for (gain, caution) in [(14.9, true), (15.0, false), (15.1, false)] {
            let outcome = eval(RawClinicalInput {
                weight_gain_g_per_kg: gain,
                ..baseline()
            });
            assert_eq!(matches!(outcome, Outcome::Caution { .. }), caution, "gain {gain}");
        }
    }

    #[test]
    fn test_oral_feed_boundaries() {
        // 80% is low risk regardless of residuals.
        let outcome = eval(RawClinicalInput {
            oral_feed_percentage: 80,
            residuals_or_emesis: true,
            ..baseline()
        });
        assert!(outcome.is_safe());

        // 79% with modest tolerance falls to the fallback.
        let outcome = eval(RawClinicalInput {
            oral_feed_percentage: 79,
            ..baseline()
        });
        assert_eq!(
            outcome,
            Outcome::NotSafe {
                reason: NotSafeReason::FeedingConcerns
            }
        );

        // 50% with residuals is not "poor tolerance", it is a general feeding concern.
        let raw = RawClinicalInput {
            oral_feed_percentage: 50,
            residuals_or_emesis: true,
            feeding_tolerance_ml_per_kg: 150.0,
            ..baseline()
        };
        assert_eq!(
            eval(raw).rationale(),
            "Not safe for discharge: Feeding concerns present."
        );
        assert_eq!(decided_by(raw), "feeding.concerns");
    }

    #[test]
    fn test_stable_on_ng_feeds() {
        let raw = RawClinicalInput {
            oral_feed_percentage: 20,
            feeding_tolerance_ml_per_kg: 150.0,
            home_nursing_available: false,
            distance_from_hospital_hours: 2.0,
            ..baseline()
        };
        let outcome = eval(raw);
        assert_eq!(
            outcome,
            Outcome::SafeWithConsiderations {
                feeding_risk: FeedingRisk::StableOnNgFeeds,
                social_risk: SocialRisk::ModerateNeedsFollowUp,
            }
        );
        assert_eq!(
            outcome.rationale(),
            "Safe for discharge with considerations. Stable on NG feeds, consider discharge with monitoring. Moderate risk: Ensure follow-up plan."
        );

        // Exactly 120 mL/kg/day is not enough.
        let outcome = eval(RawClinicalInput {
            feeding_tolerance_ml_per_kg: 120.0,
            ..raw
        });
        assert_eq!(
            outcome,
            Outcome::NotSafe {
                reason: NotSafeReason::FeedingConcerns
            }
        );
    }

    #[test]
    fn test_distance_boundary_without_home_nursing() {
        let raw = RawClinicalInput {
            home_nursing_available: false,
            ..baseline()
        };
        let at = eval(RawClinicalInput {
            distance_from_hospital_hours: 2.0,
            ..raw
        });
        assert_eq!(
            at,
            Outcome::SafeWithConsiderations {
                feeding_risk: FeedingRisk::LowRiskOralFeeding,
                social_risk: SocialRisk::ModerateNeedsFollowUp,
            }
        );

        let above = eval(RawClinicalInput {
            distance_from_hospital_hours: 2.0001,
            ..raw
        });
        assert!(matches!(above, Outcome::HighRisk { .. }));
    }

    #[test]
    fn test_home_nursing_overrides_distance() {
        let outcome = eval(RawClinicalInput {
            home_nursing_available: true,
            distance_from_hospital_hours: 10.0,
            ..baseline()
        });
        assert!(outcome.is_safe());
    }

    fn boundary_grid() -> Vec<RawClinicalInput> {
        let mut grid = Vec::new();
        for oxygen_requirement_lpm in [0.0, 0.1, 0.1001] {
            for weight_gain_g_per_kg in [14.9, 15.0, 15.1] {
                for oral_feed_percentage in [0, 49, 50, 79, 80, 100] {
                    for feeding_tolerance_ml_per_kg in [0.0, 120.0, 120.5] {
                        for distance_from_hospital_hours in [2.0, 2.0001] {
                            for flags in 0u8..32 {
                                grid.push(RawClinicalInput {
                                    apnea_bradycardia_recent: flags & 16 != 0,
                                    oxygen_requirement_lpm,
                                    weight_gain_g_per_kg,
                                    oral_feed_percentage,
                                    feeding_tolerance_ml_per_kg,
                                    residuals_or_emesis: flags & 1 != 0,
                                    parent_trained: flags & 2 != 0,
                                    caregiver_competent: flags & 4 != 0,
                                    home_nursing_available: flags & 8 != 0,
                                    distance_from_hospital_hours,
                                });
                            }
                        }
                    }
                }
            }
        }
        grid
    }

    /// Reference chain written as plain if/else, used to cross-check the tables.
    fn reference(raw: &RawClinicalInput) -> Outcome {
        let not_safe = |reason| Outcome::NotSafe { reason };

        if raw.apnea_bradycardia_recent {
            return not_safe(NotSafeReason::RecentApneaBradycardia);
        }
        if raw.oxygen_requirement_lpm > 0.1 {
            return not_safe(NotSafeReason::OxygenRequirementTooHigh);
        }
        if raw.weight_gain_g_per_kg < 15.0 {
            return Outcome::Caution {
                reason: CautionReason::LowWeightGain,
            };
        }
        let feeding_risk = if raw.oral_feed_percentage >= 80 {
            FeedingRisk::LowRiskOralFeeding
        } else if raw.oral_feed_percentage < 50 && raw.residuals_or_emesis {
            return not_safe(NotSafeReason::PoorFeedingTolerance);
        } else if raw.feeding_tolerance_ml_per_kg > 120.0 && !raw.residuals_or_emesis {
            FeedingRisk::StableOnNgFeeds
        } else {
            return not_safe(NotSafeReason::FeedingConcerns);
        };
        if !raw.parent_trained {
            return not_safe(NotSafeReason::ParentNotTrained);
        }
        if !raw.caregiver_competent {
            return Outcome::RequireSupervisedTrial {
                reason: TrialReason::CaregiverCompetencyUncertain,
            };
        }
        let social_risk = if raw.home_nursing_available {
            SocialRisk::HomeNursingSupport
        } else if raw.distance_from_hospital_hours > 2.0 {
            return Outcome::HighRisk {
                reason: HighRiskReason::TooFarFromHospital,
            };
        } else {
            SocialRisk::ModerateNeedsFollowUp
        };
        Outcome::SafeWithConsiderations {
            feeding_risk,
            social_risk,
        }
    }

    #[test]
    fn test_boundary_grid_matches_reference_chain() {
        let grid = boundary_grid();
        assert_eq!(grid.len(), 3 * 3 * 6 * 3 * 2 * 32);
        for raw in grid {
            assert_eq!(eval(raw), reference(&raw), "input {raw:?}");
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        for raw in boundary_grid().into_iter().step_by(7) {
            let input = ClinicalInput::try_from(raw).unwrap();
            assert_eq!(assess(&input), assess(&input));
            assert_eq!(evaluate(&input), evaluate(&input));
        }
    }

    #[test]
    fn test_every_rule_name_is_reachable() {
        let mut seen: Vec<&'static str> = boundary_grid().into_iter().map(decided_by).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(
            seen,
            vec![
                "feeding.concerns",
                "feeding.poor_tolerance",
                "readiness.caregiver_competency",
                "readiness.parent_not_trained",
                "social.distance",
                "social.safe_with_considerations",
                "stability.apnea_bradycardia",
                "stability.oxygen_requirement",
                "stability.weight_gain",
            ]
        );
    }
}
