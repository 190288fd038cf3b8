//! End-to-end inter-agent delegation over HTTP.
//!
//! A "math" agent whose model delegates to a remote "float" agent service,
//! which runs its own dispatch loop against the local calculator tool. The
//! model gateways are scripted; everything between them (dispatch loops,
//! proxy tool, wire protocol, axum endpoint) is real.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use agent_mesh::agent::{Agent, AgentError, DEFAULT_MAX_CYCLES};
use agent_mesh::api;
use agent_mesh::llm::{GatewayError, ModelGateway, ModelReply, Turn};
use agent_mesh::tools::{Calculator, RemoteAgentTool, Tool, ToolDeclaration, ToolError};

/// A model that always delegates to one tool, then answers with the tool's
/// result verbatim.
struct DelegatingGateway {
    tool: &'static str,
    args: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl ModelGateway for DelegatingGateway {
    async fn send_turn(
        &self,
        _system_instruction: Option<&str>,
        _tools: &[ToolDeclaration],
        history: &[Turn],
    ) -> Result<ModelReply, GatewayError> {
        match history.last() {
            Some(Turn::ToolResult { result, .. }) => Ok(ModelReply::Text(result.clone())),
            _ => Ok(ModelReply::ToolCall {
                name: self.tool.to_string(),
                args: self
                    .args
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }),
        }
    }
}

fn float_agent() -> Agent {
    let gateway = Arc::new(DelegatingGateway {
        tool: "perform_calculation",
        args: vec![
            ("value_one", "2"),
            ("value_two", "2.5"),
            ("operator", "*"),
        ],
    });
    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(Calculator)];
    let mut agent = Agent::new(gateway, None, tools, DEFAULT_MAX_CYCLES);
    agent.start_session();
    agent
}

fn math_agent(hostname_var: &'static str, port_var: &'static str) -> Agent {
    let gateway = Arc::new(DelegatingGateway {
        tool: "call_float_agent",
        args: vec![("message", "what is 2 * 2.5")],
    });
    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(RemoteAgentTool::new(
        "call_float_agent",
        "Make a request to the floating point agent",
        "The request message",
        hostname_var,
        port_var,
    ))];
    let mut agent = Agent::new(gateway, None, tools, DEFAULT_MAX_CYCLES);
    agent.start_session();
    agent
}

async fn spawn_float_service() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, api::router(float_agent())).await.unwrap();
    });
    port
}

#[tokio::test]
async fn math_agent_delegates_to_float_service() {
    let port = spawn_float_service().await;
    std::env::set_var("E2E_FLOAT_HOSTNAME", "127.0.0.1");
    std::env::set_var("E2E_FLOAT_PORT", port.to_string());

    let mut math = math_agent("E2E_FLOAT_HOSTNAME", "E2E_FLOAT_PORT");
    let answer = math.submit_request("what is 2 * 2.5").await.unwrap();

    // The float agent's calculator result travels back unchanged through the
    // wire response and the math agent's final answer.
    assert_eq!(answer, "5");
}

#[tokio::test]
async fn proxy_reuses_the_wire_envelope_directly() {
    let port = spawn_float_service().await;
    std::env::set_var("E2E_PROXY_HOSTNAME", "127.0.0.1");
    std::env::set_var("E2E_PROXY_PORT", port.to_string());

    let proxy = RemoteAgentTool::new(
        "call_float_agent",
        "Make a request to the floating point agent",
        "The request message",
        "E2E_PROXY_HOSTNAME",
        "E2E_PROXY_PORT",
    );
    let args = HashMap::from([("message".to_string(), "what is 2 * 2.5".to_string())]);
    assert_eq!(proxy.invoke(&args).await.unwrap(), "5");
}

#[tokio::test]
async fn unreachable_remote_agent_aborts_the_call() {
    std::env::set_var("E2E_DEAD_HOSTNAME", "127.0.0.1");
    // Nothing listens here.
    std::env::set_var("E2E_DEAD_PORT", "9");

    let mut math = math_agent("E2E_DEAD_HOSTNAME", "E2E_DEAD_PORT");
    let err = math.submit_request("what is 2 * 2.5").await.unwrap_err();
    match err {
        AgentError::ToolFailed { name, source } => {
            assert_eq!(name, "call_float_agent");
            assert!(matches!(source, ToolError::Transport(_)));
        }
        other => panic!("expected ToolFailed, got {:?}", other),
    }
}
