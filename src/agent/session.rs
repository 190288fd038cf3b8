//! Conversation session state.

use crate::llm::Turn;

/// One ordered, append-only conversation history bound to a model gateway.
///
/// Only the dispatch loop mutates a session, and each loop cycle appends
/// exactly one outbound and one inbound turn. Replacing the session discards
/// the history; there is no rollback.
#[derive(Debug, Default)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The full turn history, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
