//! Agent module - the tool dispatch loop and its session state.
//!
//! An agent drives a "tools in a loop" conversation:
//! 1. Send the user request to the model with the advertised tool set
//! 2. If the model requests a tool call, dispatch it and feed the result back
//! 3. Repeat until the model produces a terminal text answer or the cycle
//!    budget runs out

mod dispatch_loop;
mod session;

pub use dispatch_loop::{Agent, AgentError, DEFAULT_MAX_CYCLES};
pub use session::Session;
