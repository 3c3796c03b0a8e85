//! Chat session: transcript plus turn dispatch

use finagent_core::ChatMessage;
use finagent_runtime::{Agent, AgentError};
use std::sync::Arc;
use tracing::{info, warn};

/// Where the session is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No turn submitted yet
    Empty,
    AwaitingInput,
    TurnInProgress,
}

/// One user's conversation with the agent
///
/// The transcript is append-only and lives as long as the session. A user
/// message is recorded as soon as it is submitted; the answer only if the
/// turn succeeds. `submit` takes `&mut self`, so turns never overlap.
pub struct ChatSession {
    agent: Arc<dyn Agent>,
    transcript: Vec<ChatMessage>,
    state: SessionState,
}

impl ChatSession {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            transcript: Vec::new(),
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Run one turn and return the answer
    ///
    /// The agent sees the transcript as it stood before `input`.
    pub async fn submit(&mut self, input: &str) -> Result<String, AgentError> {
        let history_len = self.transcript.len();
        self.transcript.push(ChatMessage::user(input));
        self.state = SessionState::TurnInProgress;
        info!(agent = self.agent.name(), history_len, "Turn started");

        let outcome = self
            .agent
            .respond(input, &self.transcript[..history_len])
            .await;
        self.state = SessionState::AwaitingInput;

        match outcome {
            Ok(answer) => {
                self.transcript.push(ChatMessage::assistant(answer.clone()));
                info!(answer_length = answer.len(), "Turn completed");
                Ok(answer)
            }
            Err(e) => {
                warn!(error = %e, "Turn failed");
                Err(e)
            }
        }
    }
}
