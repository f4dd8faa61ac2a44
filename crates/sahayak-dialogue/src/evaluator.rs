//! Self-assessment of conversation health.
//!
//! Looks at the interaction log for loops (the agent asking the same thing
//! over and over), unresolved contradictions, and whether the user has
//! given any of the information the agent needs.

use serde::Serialize;

use sahayak_core::types::{Contradiction, Interaction};

/// Words in user text that show information is being provided.
pub const INFO_KEYWORDS: &[&str] = &["వయస్సు", "ఆదాయం", "వృత్తి", "age", "income", "occupation"];

/// Words in agent text that show a tool result was delivered.
pub const TOOL_KEYWORDS: &[&str] = &["అర్హత", "సిఫార్సు", "eligibility", "recommend"];

/// Identical agent turns in a row that count as a loop.
pub const STUCK_WINDOW: usize = 3;

/// Progress below this asks for the goal to be reassessed.
pub const MIN_PROGRESS: f32 = 0.3;

/// Verdict on the conversation so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    /// The agent keeps repeating itself; change approach.
    Stuck,
    /// The user has contradicted themselves; clarify.
    ClarifyContradictions { contradictions: Vec<Contradiction> },
    /// Little progress towards the goal.
    Reassess { progress: f32 },
    ProgressingWell,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationEvaluator;

impl ConversationEvaluator {
    /// Rough progress score: 1.0 once information was given and a tool
    /// result was mentioned, 0.5 with information only, 0.1 otherwise.
    pub fn assess_goal_progress(&self, history: &[Interaction]) -> f32 {
        let info_collected = history
            .iter()
            .any(|entry| contains_any(&entry.user, INFO_KEYWORDS));
        let tool_used = history
            .iter()
            .any(|entry| contains_any(&entry.agent, TOOL_KEYWORDS));

        match (info_collected, tool_used) {
            (true, true) => 1.0,
            (true, false) => 0.5,
            _ => 0.1,
        }
    }

    /// True when the last [`STUCK_WINDOW`] agent turns are identical.
    pub fn is_stuck(&self, history: &[Interaction]) -> bool {
        if history.len() < STUCK_WINDOW {
            return false;
        }
        let recent = &history[history.len() - STUCK_WINDOW..];
        recent.iter().all(|entry| entry.agent == recent[0].agent)
    }

    /// Combine the checks: a loop first, then contradictions, then progress.
    pub fn evaluate(&self, history: &[Interaction], contradictions: &[Contradiction]) -> Evaluation {
        if self.is_stuck(history) {
            return Evaluation::Stuck;
        }
        if !contradictions.is_empty() {
            return Evaluation::ClarifyContradictions {
                contradictions: contradictions.to_vec(),
            };
        }
        let progress = self.assess_goal_progress(history);
        if progress < MIN_PROGRESS {
            return Evaluation::Reassess { progress };
        }
        Evaluation::ProgressingWell
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

// =============================================================================
// Tests
// =============================================================================
