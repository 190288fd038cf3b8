//! # agent-mesh
//!
//! Tool-calling LLM agents deployed as independent HTTP services that can
//! invoke one another as tools.
//!
//! This library provides:
//! - A bounded tool dispatch loop driving a model conversation to an answer
//! - A tool contract under which local computation and remote agent calls
//!   are interchangeable
//! - An HTTP endpoint exposing an agent so other agents can call it
//!
//! ## Architecture
//!
//! An agent follows the "tools in a loop" pattern:
//! 1. Receive an input via [`agent::Agent::submit_request`]
//! 2. Send it to the model with the agent's advertised tool set
//! 3. If the model requests a tool, dispatch it and feed the result back
//! 4. Repeat until the model answers in text or the cycle budget runs out
//!
//! A [`tools::RemoteAgentTool`] forwards its invocation to another agent's
//! `/agent` endpoint, so services compose into a small distributed reasoning
//! graph: the math agent answers by calling the float agent, which runs its
//! own loop against its own calculator tool.
//!
//! ## Example
//!
//! ```rust,ignore
//! use agent_mesh::{config::Config, presets};
//!
//! let config = Config::from_env()?;
//! let mut agent = presets::float_agent(&config);
//! agent.start_session();
//! let answer = agent.submit_request("what is 2 * 2.5").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod presets;
pub mod tools;

pub use config::Config;
