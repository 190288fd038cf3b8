//! Concrete agent wiring.
//!
//! Agents are built here as explicit values and handed to whatever serves
//! them; there is no process-wide agent registry.

use std::sync::Arc;

use crate::agent::Agent;
use crate::config::Config;
use crate::llm::GeminiClient;
use crate::tools::{Calculator, RemoteAgentTool, Tool};

/// Environment variables addressing the float agent service.
pub const FLOAT_AGENT_HOSTNAME_VAR: &str = "FLOAT_AGENT_HOSTNAME";
pub const FLOAT_AGENT_PORT_VAR: &str = "FLOAT_AGENT_PORT";

/// The high precision floating point agent: answers calculation requests
/// with its local calculator tool.
pub fn float_agent(config: &Config) -> Agent {
    let system = "Your task is to perform high precision floating point calculations.\n\
                  Reply ONLY with the calculated result.";
    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Calculator)];

    Agent::new(
        gateway(config),
        Some(system.to_string()),
        tools,
        config.max_cycles,
    )
}

/// The general math agent: delegates floating point work to the float agent
/// service over HTTP.
pub fn math_agent(config: &Config) -> Agent {
    let system = "Your task is to perform math calculations.\n\
                  For floating point requests use agent tools to help with your results.\n\
                  Reply ONLY with the calculated result.";
    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(RemoteAgentTool::new(
        "call_float_agent",
        "Make a request to the floating point agent. The agent will perform the calculation and return the result.",
        "The natural language request message for the floating point calculation agent",
        FLOAT_AGENT_HOSTNAME_VAR,
        FLOAT_AGENT_PORT_VAR,
    ))];

    Agent::new(
        gateway(config),
        Some(system.to_string()),
        tools,
        config.max_cycles,
    )
}

fn gateway(config: &Config) -> Arc<GeminiClient> {
    Arc::new(GeminiClient::new(
        config.api_key.clone(),
        config.model.clone(),
    ))
}
