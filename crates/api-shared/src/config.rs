//! API runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the servers, so request
//! handling never reads process-wide environment variables. Parsing is split from reading: the
//! `from_env_values` constructor takes the raw values and is what the tests exercise.

use std::net::SocketAddr;

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default gRPC listen address.
pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:50051";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} address '{value}': {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("NEOFEED_ENABLE_REFLECTION must be 'true' or 'false' (got '{0}')")]
    InvalidFlag(String),
    #[error("API_KEY must be set to a non-empty value for the gRPC server")]
    MissingApiKey,
}

/// API configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    rest_addr: SocketAddr,
    grpc_addr: SocketAddr,
    enable_reflection: bool,
    api_key: Option<String>,
}

fn parse_addr(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());
    value
        .parse()
        .map_err(|source| ConfigError::InvalidAddr { var, value, source })
}

impl ApiConfig {
    /// Build a configuration from raw environment values.
    ///
    /// Missing or blank values fall back to defaults; `API_KEY` has no default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an address does not parse or the reflection flag is not a
    /// boolean.
    pub fn from_env_values(
        rest_addr: Option<String>,
        grpc_addr: Option<String>,
        enable_reflection: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let enable_reflection = match enable_reflection.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(flag) => flag
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidFlag(flag.to_string()))?,
        };

        Ok(Self {
            rest_addr: parse_addr("NEOFEED_REST_ADDR", rest_addr, DEFAULT_REST_ADDR)?,
            grpc_addr: parse_addr("NEOFEED_GRPC_ADDR", grpc_addr, DEFAULT_GRPC_ADDR)?,
            enable_reflection,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_values(
            std::env::var("NEOFEED_REST_ADDR").ok(),
            std::env::var("NEOFEED_GRPC_ADDR").ok(),
            std::env::var("NEOFEED_ENABLE_REFLECTION").ok(),
            std::env::var("API_KEY").ok(),
        )
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn grpc_addr(&self) -> SocketAddr {
        self.grpc_addr
    }

    pub fn enable_reflection(&self) -> bool {
        self.enable_reflection
    }

    /// The gRPC API key; the gRPC server refuses to start without one.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
