//! Remote agent invocation proxy.
//!
//! A tool whose work happens on another agent service: the invocation is
//! serialized as a wire request, POSTed to the remote `/agent` endpoint, and
//! the remote agent's final answer becomes this tool's result. The dispatch
//! loop cannot tell it apart from local computation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::api::types::{WireRequest, WireResponse};
use crate::config::RemoteEndpoint;

use super::{require_arg, ParamSpec, Tool, ToolError};

/// A tool that forwards its `message` argument to a remote agent service and
/// returns that agent's answer.
pub struct RemoteAgentTool {
    name: &'static str,
    description: &'static str,
    message_description: &'static str,
    hostname_var: &'static str,
    port_var: &'static str,
}

impl RemoteAgentTool {
    /// Build a proxy for the remote agent addressed by the given environment
    /// variable pair. The address is re-read on every invocation.
    pub fn new(
        name: &'static str,
        description: &'static str,
        message_description: &'static str,
        hostname_var: &'static str,
        port_var: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            message_description,
            hostname_var,
            port_var,
        }
    }
}

#[async_trait]
impl Tool for RemoteAgentTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec {
            name: "message",
            description: self.message_description,
        }]
    }

    async fn invoke(&self, args: &HashMap<String, String>) -> Result<String, ToolError> {
        let message = require_arg(args, "message")?;

        let endpoint = RemoteEndpoint::from_env(self.hostname_var, self.port_var)?;
        let url = endpoint.agent_url();
        tracing::info!("forwarding to remote agent at {}: {}", url, message);

        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .json(&WireRequest {
                input: message.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Endpoint {
                status: status.as_u16(),
            });
        }

        let reply: WireResponse = response.json().await?;
        Ok(reply.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_message_is_typed_error() {
        let tool = RemoteAgentTool::new(
            "call_other_agent",
            "Forward a request to another agent",
            "The request message",
            "OTHER_AGENT_HOSTNAME",
            "OTHER_AGENT_PORT",
        );
        let err = tool.invoke(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(ref name) if name == "message"));
    }

    #[tokio::test]
    async fn unconfigured_endpoint_is_typed_error() {
        let tool = RemoteAgentTool::new(
            "call_other_agent",
            "Forward a request to another agent",
            "The request message",
            "UNSET_PROXY_TEST_HOSTNAME",
            "UNSET_PROXY_TEST_PORT",
        );
        let args = HashMap::from([("message".to_string(), "what is 1+1".to_string())]);
        let err = tool.invoke(&args).await.unwrap_err();
        assert!(matches!(err, ToolError::Unconfigured(_)));
    }
}
