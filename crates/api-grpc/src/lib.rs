//! # API gRPC
//!
//! gRPC server implementation for NeoFeed.
//!
//! Handles:
//! - gRPC service setup and API-key authentication
//! - Service implementation delegating to `api-shared`'s evaluation service
//! - gRPC-specific concerns (interceptors, status codes, tonic integration)

#![warn(rust_2018_idioms)]

pub use service::{pb, ApiKeyInterceptor, NeoFeedService};

pub mod service;
