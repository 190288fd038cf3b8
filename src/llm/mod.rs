//! Model gateway abstraction.
//!
//! The gateway is the single boundary to the language-model provider. It
//! takes the conversation history plus the advertised tool set and returns
//! one [`ModelReply`]: either a terminal text answer or a request to invoke
//! one named tool. The reply shape is decided exactly once here; downstream
//! code only ever matches on the two-variant sum type.

mod gemini;

pub use gemini::GeminiClient;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::tools::ToolDeclaration;

/// One entry in a conversation history.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Text sent by the caller.
    User(String),
    /// Terminal text produced by the model.
    Model(String),
    /// The model asked for a tool invocation.
    ToolRequest {
        name: String,
        args: HashMap<String, String>,
    },
    /// The result of a tool invocation, fed back to the model.
    ToolResult { name: String, result: String },
}

/// What the model said in reply to the latest turn.
///
/// Only the first content unit of the first candidate reply counts; providers
/// that return more than one are truncated to this shape at the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// A terminal text answer.
    Text(String),
    /// A request to invoke one named tool with string arguments.
    ToolCall {
        name: String,
        args: HashMap<String, String>,
    },
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error calling model provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model provider returned HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("model reply contained no candidates")]
    EmptyReply,

    #[error("model reply content was neither text nor a tool call")]
    MalformedReply,
}

/// A connection to a language-model provider.
///
/// `history` is the full ordered turn sequence for the session; its last
/// element is the outbound message for this exchange.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn send_turn(
        &self,
        system_instruction: Option<&str>,
        tools: &[ToolDeclaration],
        history: &[Turn],
    ) -> Result<ModelReply, GatewayError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted gateway for exercising the dispatch loop without a provider.

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Replays a fixed sequence of replies and counts the turns it served.
    pub(crate) struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<ModelReply, GatewayError>>>,
        turns: AtomicUsize,
    }

    impl ScriptedGateway {
        pub(crate) fn new(replies: Vec<Result<ModelReply, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                turns: AtomicUsize::new(0),
            }
        }

        pub(crate) fn turns_served(&self) -> usize {
            self.turns.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn send_turn(
            &self,
            _system_instruction: Option<&str>,
            _tools: &[ToolDeclaration],
            _history: &[Turn],
        ) -> Result<ModelReply, GatewayError> {
            self.turns.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .expect("scripted gateway poisoned")
                .pop_front()
                .unwrap_or(Err(GatewayError::EmptyReply))
        }
    }
}
