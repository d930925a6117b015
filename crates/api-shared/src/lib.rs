//! # API Shared
//!
//! Shared utilities and definitions for the NeoFeed APIs.
//!
//! Contains:
//! - Protobuf-generated types (`pb` module)
//! - Shared services: `HealthService` and `EvaluationService`
//! - API-key authentication (usable by both gRPC and REST)
//! - Runtime configuration resolved once at startup
//!
//! Used by `api-grpc` and `api-rest` so both surfaces return identical evaluations.

// The generated code is placed into OUT_DIR by the build script.
pub mod pb {
    tonic::include_proto!("neofeed.v1");
}

pub mod auth;
pub mod config;
pub mod evaluation;
pub mod health;

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("neofeed_descriptor");

pub use config::{ApiConfig, ConfigError};
pub use evaluation::EvaluationService;
pub use health::HealthService;
pub use pb::*;
