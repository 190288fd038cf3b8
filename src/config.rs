//! Configuration management for agent-mesh services.
//!
//! Configuration is read from environment variables:
//! - `GEMINI_API_KEY` - Required. API key for the model provider.
//! - `GEMINI_MODEL` - Optional. Model identifier. Defaults to `gemini-2.0-flash`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MAX_CYCLES` - Optional. Dispatch loop cycle budget. Defaults to `25`.
//!
//! Each remote agent a service talks to is addressed by its own pair of
//! environment variables (e.g. `FLOAT_AGENT_HOSTNAME` / `FLOAT_AGENT_PORT`),
//! read through [`RemoteEndpoint::from_env`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model provider API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum cycles for the tool dispatch loop
    pub max_cycles: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let host = std::env::var("HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_cycles = std::env::var("MAX_CYCLES")
            .unwrap_or_else(|_| "25".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_CYCLES".to_string(), format!("{}", e)))?;

        Ok(Self {
            api_key,
            model,
            host,
            port,
            max_cycles,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_cycles: 25,
        }
    }
}

/// Network address of a remote agent service.
///
/// Resolved from the environment on demand so a caller always sees the
/// current values, not a snapshot taken at startup.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    pub hostname: String,
    pub port: String,
}

impl RemoteEndpoint {
    /// Read a hostname/port pair from the named environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming whichever variable is
    /// absent.
    pub fn from_env(hostname_var: &str, port_var: &str) -> Result<Self, ConfigError> {
        let hostname = std::env::var(hostname_var)
            .map_err(|_| ConfigError::MissingEnvVar(hostname_var.to_string()))?;
        let port = std::env::var(port_var)
            .map_err(|_| ConfigError::MissingEnvVar(port_var.to_string()))?;
        Ok(Self { hostname, port })
    }

    /// The `/agent` endpoint URL for this remote agent.
    pub fn agent_url(&self) -> String {
        format!("http://{}:{}/agent", self.hostname, self.port)
    }
}
