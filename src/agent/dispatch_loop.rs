//! Core tool dispatch loop implementation.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::llm::{GatewayError, ModelGateway, ModelReply, Turn};
use crate::tools::{declaration_for, Tool, ToolDeclaration, ToolError};

use super::session::Session;

/// Default cycle budget for one submitted request.
///
/// Tool-calling conversations with a non-deterministic model are not
/// guaranteed to terminate; the budget converts an unbounded exchange into a
/// bounded one at the cost of occasionally truncating legitimate multi-step
/// reasoning.
pub const DEFAULT_MAX_CYCLES: usize = 25;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("no active session; call start_session first")]
    NoSession,

    #[error("model requested undeclared tool '{name}'")]
    UnhandledTool { name: String },

    #[error("tool '{name}' failed: {source}")]
    ToolFailed {
        name: String,
        #[source]
        source: ToolError,
    },

    #[error("no terminal answer after {limit} cycles")]
    CycleLimitExceeded { limit: usize },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// A model-backed agent: one gateway connection, one tool set, at most one
/// active session.
pub struct Agent {
    gateway: Arc<dyn ModelGateway>,
    system_instruction: Option<String>,
    declarations: Vec<ToolDeclaration>,
    dispatch: HashMap<String, Arc<dyn Tool>>,
    session: Option<Session>,
    max_cycles: usize,
}

impl Agent {
    /// Bundle a gateway, system instruction, and tool set into an agent.
    ///
    /// The dispatch table and the declarations advertised to the model are
    /// built from the same tool list, so every advertised name is
    /// dispatchable by construction.
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        system_instruction: Option<String>,
        tools: Vec<Arc<dyn Tool>>,
        max_cycles: usize,
    ) -> Self {
        let declarations = tools.iter().map(|t| declaration_for(t.as_ref())).collect();
        let dispatch = tools
            .into_iter()
            .map(|t| (t.name().to_string(), t))
            .collect();

        Self {
            gateway,
            system_instruction,
            declarations,
            dispatch,
            session: None,
            max_cycles,
        }
    }

    /// Begin a fresh session, discarding any existing conversation history.
    pub fn start_session(&mut self) {
        self.session = Some(Session::new());
    }

    /// The active session, if one has been started.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Submit one request and run the dispatch loop to a terminal answer.
    ///
    /// Each cycle sends the pending outbound turn (the user text, then each
    /// tool result) and inspects the reply: text is the answer, a tool call
    /// is dispatched and its result becomes the next outbound turn. A tool
    /// name missing from the dispatch table is a protocol violation and
    /// aborts immediately with no further model turns. The session history
    /// grows by exactly two turns per cycle and is not rolled back on error.
    pub async fn submit_request(&mut self, text: &str) -> Result<String, AgentError> {
        if self.session.is_none() {
            return Err(AgentError::NoSession);
        }

        let mut outbound = Turn::User(text.to_string());

        for cycle in 0..self.max_cycles {
            let session = self.session.as_mut().ok_or(AgentError::NoSession)?;
            session.push(outbound.clone());

            tracing::debug!("dispatch cycle {}", cycle + 1);
            let reply = self
                .gateway
                .send_turn(
                    self.system_instruction.as_deref(),
                    &self.declarations,
                    session.turns(),
                )
                .await?;

            match reply {
                ModelReply::Text(content) => {
                    session.push(Turn::Model(content.clone()));
                    tracing::debug!("terminal answer after {} cycle(s)", cycle + 1);
                    return Ok(content);
                }
                ModelReply::ToolCall { name, args } => {
                    session.push(Turn::ToolRequest {
                        name: name.clone(),
                        args: args.clone(),
                    });

                    let Some(tool) = self.dispatch.get(&name) else {
                        return Err(AgentError::UnhandledTool { name });
                    };

                    tracing::info!("invoking tool '{}'", name);
                    let result = tool.invoke(&args).await.map_err(|source| {
                        AgentError::ToolFailed {
                            name: name.clone(),
                            source,
                        }
                    })?;

                    outbound = Turn::ToolResult { name, result };
                }
            }
        }

        Err(AgentError::CycleLimitExceeded {
            limit: self.max_cycles,
        })
    }
}
