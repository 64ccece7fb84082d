//! Handles configuration for the server, typically pulling from structured environment variables.

use std::{collections::HashMap, net::Ipv4Addr, num::NonZeroUsize};

use numerology::VariationPolicy;

use crate::{ServerError, ServerResult};

/// Longest text, in characters, accepted when `CALCULATION__MAX_TEXT_LENGTH` is not set.
pub const DEFAULT_MAX_TEXT_LENGTH: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// The main configuration struct for the server.
#[derive(Debug)]
pub struct Config {
    /// Configuration for the server module.
    pub server: ServerConfig,
    /// Configuration for request validation and the calculator.
    pub calculation: CalculationConfig,
    /// Configuration for trace export.
    pub tracing: TracingConfig,
}

impl Config {
    /// Constructs a `Config` instance by loading settings from a hashmap of environment variables.
    ///
    /// # Errors
    /// Returns a `ServerError` if any required environment variable is missing or invalid.
    ///
    /// # Examples
    /// ```rust,ignore
    /// let env = std::env::vars().collect::<HashMap<String, String>>();
    /// let config = Config::from_env(&env).expect("Failed to load configuration");
    /// println!("Server is running on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn from_env(env: &HashMap<String, String>) -> ServerResult<Self> {
        Ok(Self {
            server: ServerConfig::from_env(env)?,
            calculation: CalculationConfig::from_env(env)?,
            tracing: TracingConfig::from_env(env),
        })
    }
}

/// Returns the value of `key` when it is present and non-empty.
fn non_empty<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Returns the value of `key`, failing with [`ServerError::MissingEnvVar`] when absent or empty.
fn required<'a>(env: &'a HashMap<String, String>, key: &'static str) -> ServerResult<&'a str> {
    non_empty(env, key).ok_or(ServerError::MissingEnvVar(key))
}

/// Configuration specific to the global server module.
#[derive(Debug)]
pub struct ServerConfig {
    /// The host to bind the server to.
    pub host: Ipv4Addr,
    /// The port to bind the server to.
    pub port: u16,
}

impl ServerConfig {
    /// Constructs a `ServerConfig` instance by loading `SERVER__HOST` and `SERVER__PORT` from a provided HashMap.
    ///
    /// # Errors
    /// Returns a `ServerError` if any of the required environment variables are missing or invalid.
    pub fn from_env(env: &HashMap<String, String>) -> ServerResult<Self> {
        let raw_host = required(env, "SERVER__HOST")?;
        let host = raw_host.parse::<Ipv4Addr>().map_err(|e| {
            ServerError::InvalidEnvVar("SERVER__HOST", raw_host.to_string(), e.to_string())
        })?;

        let raw_port = required(env, "SERVER__PORT")?;
        let port = raw_port.parse::<u16>().map_err(|e| {
            ServerError::InvalidEnvVar("SERVER__PORT", raw_port.to_string(), e.to_string())
        })?;

        Ok(Self { host, port })
    }
}

/// Configuration for request validation and how alternate Ebced totals are derived.
#[derive(Debug)]
pub struct CalculationConfig {
    /// Longest text, counted in characters, that the API will accept.
    pub max_text_length: NonZeroUsize,
    /// Which derivation the calculator uses for the alternate Arabic totals.
    pub variation_policy: VariationPolicy,
}

impl CalculationConfig {
    /// Constructs a `CalculationConfig` from the following optional environment variables:
    ///
    /// - `CALCULATION__MAX_TEXT_LENGTH`: a non-zero character count, defaults to 10000.
    /// - `CALCULATION__VARIATION_POLICY`: `letter-tables` (default) or `classic`.
    ///
    /// # Errors
    /// Returns a `ServerError::InvalidEnvVar` if a value is present but cannot be parsed.
    pub fn from_env(env: &HashMap<String, String>) -> ServerResult<Self> {
        let max_text_length = match non_empty(env, "CALCULATION__MAX_TEXT_LENGTH") {
            None => DEFAULT_MAX_TEXT_LENGTH,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| {
                    ServerError::InvalidEnvVar(
                        "CALCULATION__MAX_TEXT_LENGTH",
                        raw.to_string(),
                        e.to_string(),
                    )
                })?
                .try_into()
                .map_err(|_| {
                    ServerError::InvalidEnvVar(
                        "CALCULATION__MAX_TEXT_LENGTH",
                        raw.to_string(),
                        "Length must be non-zero".to_string(),
                    )
                })?,
        };

        let variation_policy = match non_empty(env, "CALCULATION__VARIATION_POLICY") {
            None => VariationPolicy::default(),
            Some(raw) => raw.parse::<VariationPolicy>().map_err(|e| {
                ServerError::InvalidEnvVar(
                    "CALCULATION__VARIATION_POLICY",
                    raw.to_string(),
                    e.to_string(),
                )
            })?,
        };

        Ok(Self {
            max_text_length,
            variation_policy,
        })
    }
}

/// Configuration for exporting traces over OTLP.
#[derive(Debug, Default)]
pub struct TracingConfig {
    /// Collector endpoint, e.g. `http://localhost:4317`. Export is disabled when unset.
    pub otlp_endpoint: Option<String>,
}

impl TracingConfig {
    /// Reads the standard `OTEL_EXPORTER_OTLP_ENDPOINT` variable.
    #[must_use]
    pub fn from_env(env: &HashMap<String, String>) -> Self {
        Self {
            otlp_endpoint: non_empty(env, "OTEL_EXPORTER_OTLP_ENDPOINT").map(str::to_string),
        }
    }
}
