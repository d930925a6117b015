//! # NeoFeed Core
//!
//! Discharge-readiness logic for NICU infants on nasogastric (NG) tube feeding.
//!
//! This crate contains the pure decision procedure and the types around it:
//! - [`ClinicalInput`], the validated record of the ten observations
//! - [`Outcome`], the closed set of discharge recommendations
//! - [`evaluate`] / [`assess`], the ordered rule chain
//! - YAML/JSON case-file loading for the CLI
//!
//! **No API concerns**: HTTP/gRPC servers, authentication and prompting belong in `api-rest`,
//! `api-grpc`, `api-shared` and `neofeed-cli`.

pub mod case_file;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod outcome;

pub use error::{CoreError, CoreResult, InputContractViolation};
pub use evaluator::{assess, evaluate, Assessment};
pub use input::{ClinicalInput, RawClinicalInput};
pub use outcome::{
    CautionReason, FeedingRisk, HighRiskReason, NotSafeReason, Outcome, SocialRisk, TrialReason,
};

pub use neofeed_types::{NonNegative, Percentage};
