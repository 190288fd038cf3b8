//! Wire types for the inter-agent protocol.

use serde::{Deserialize, Serialize};

/// Request to submit one input to an agent service.
///
/// This envelope is the entire inter-agent protocol payload; there are no
/// session, identity, or auth fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    /// The natural-language input for the agent
    pub input: String,
}

/// The agent's terminal answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    /// The final text answer produced by the agent's dispatch loop
    pub content: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
