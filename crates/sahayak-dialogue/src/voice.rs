//! Voice boundary: speech out, transcribed text in.
//!
//! The dialogue engine only sees text. Implementations wrap whatever
//! produces and consumes it: a speech stack, a console, or a script.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::DialogueError;

// =============================================================================
// Traits
// =============================================================================

/// Two-way text channel to the user.
pub trait VoiceIo {
    /// Say `text` to the user.
    fn speak(&mut self, text: &str);

    /// Wait for the next user utterance.
    ///
    /// Returns `Ok(None)` once no more input will arrive, and an error when
    /// a single capture or transcription attempt failed.
    fn listen(&mut self) -> Result<Option<String>, DialogueError>;
}

// =============================================================================
// Scripted implementation
// =============================================================================

/// Replays a fixed list of utterances and records everything spoken.
///
/// Used for the text demo and for tests without audio hardware.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVoice {
    inputs: VecDeque<String>,
    spoken: Vec<String>,
    pending_failures: u32,
}

impl ScriptedVoice {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            spoken: Vec::new(),
            pending_failures: 0,
        }
    }

    /// Make the next `count` calls to `listen` fail.
    pub fn fail_next(mut self, count: u32) -> Self {
        self.pending_failures = count;
        self
    }

    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    /// Number of utterances not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl VoiceIo for ScriptedVoice {
    fn speak(&mut self, text: &str) {
        debug!(chars = text.chars().count(), "Scripted voice speaking");
        self.spoken.push(text.to_string());
    }

    fn listen(&mut self) -> Result<Option<String>, DialogueError> {
        if self.pending_failures > 0 {
            self.pending_failures -= 1;
            return Err(DialogueError::Voice("scripted listen failure".to_string()));
        }
        Ok(self.inputs.pop_front())
    }
}

// =============================================================================
// Tests
// =============================================================================
