//! Error types for the dialogue engine.

use sahayak_core::error::AgentError;

/// Errors raised at the edges of the dialogue engine.
///
/// Turn processing itself never fails; these come from the voice boundary
/// and from `DialogueController::from_config`.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("voice error: {0}")]
    Voice(String),
    #[error("core error: {0}")]
    Core(String),
}

impl From<AgentError> for DialogueError {
    fn from(err: AgentError) -> Self {
        DialogueError::Core(err.to_string())
    }
}
