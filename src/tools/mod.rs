//! Tool contract and implementations.
//!
//! A tool is a named capability the model may request during a dispatch
//! loop. Implementations validate their own arguments and return a single
//! string result; whether the work happens locally ([`Calculator`]) or on
//! another agent service ([`RemoteAgentTool`]) is invisible to the loop.

mod calculator;
mod remote_agent;

pub use calculator::Calculator;
pub use remote_agent::RemoteAgentTool;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("remote agent endpoint not configured: {0}")]
    Unconfigured(#[from] ConfigError),

    #[error("transport error calling remote agent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote agent returned HTTP {status}")]
    Endpoint { status: u16 },
}

/// One declared tool parameter. Every parameter is string-typed: the model
/// itself converts natural language into stringified values.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// A tool as advertised to the model.
#[derive(Debug, Clone)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

/// A capability the dispatch loop can invoke on the model's behalf.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, unique within an agent's tool set.
    fn name(&self) -> &str;

    /// Natural-language description guiding the model's decision to call it.
    fn description(&self) -> &str;

    /// Required parameters, all string-typed.
    fn parameters(&self) -> Vec<ParamSpec>;

    /// Run the tool. Implementations check for their required arguments and
    /// return [`ToolError::MissingArgument`] when one is absent.
    async fn invoke(&self, args: &HashMap<String, String>) -> Result<String, ToolError>;
}

/// Build the declaration advertised to the model for a tool.
pub fn declaration_for(tool: &dyn Tool) -> ToolDeclaration {
    ToolDeclaration {
        name: tool.name().to_string(),
        description: tool.description().to_string(),
        params: tool.parameters(),
    }
}

/// Fetch a required argument or fail with a typed error.
pub(crate) fn require_arg<'a>(
    args: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, ToolError> {
    args.get(name)
        .map(String::as_str)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}
