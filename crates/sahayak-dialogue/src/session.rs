//! Conversation loop: greet, then listen, process and speak until the
//! dialogue ends, the user says goodbye, or input runs out.

use serde::Serialize;
use tracing::{debug, info, warn};

use sahayak_core::config::DialogueConfig;
use sahayak_core::types::ConversationState;

use crate::controller::DialogueController;
use crate::evaluator::Evaluation;
use crate::prompts;
use crate::voice::VoiceIo;

/// Utterances replayed by the text demo.
pub const DEMO_SCRIPT: &[&str] = &[
    "నమస్కారం",
    "నేను రైతుని",
    "నా వయస్సు 35 సంవత్సరాలు",
    "నా ఆదాయం 50000",
    "ధన్యవాదాలు",
];

/// Why a conversation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The controller reached `END`.
    Completed,
    /// The user said an exit phrase.
    ExitPhrase,
    /// The voice channel has no more input.
    InputClosed,
    /// Listening failed too many times in a row.
    TooManyFailures,
}

/// Summary of one run of the loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationOutcome {
    /// User turns handed to the controller.
    pub turns: usize,
    pub reason: EndReason,
    pub final_state: ConversationState,
}

/// Runs a [`DialogueController`] against a [`VoiceIo`].
#[derive(Debug, Clone)]
pub struct ConversationRunner {
    exit_phrases: Vec<String>,
    max_listen_failures: u32,
}

impl Default for ConversationRunner {
    fn default() -> Self {
        Self::new(&DialogueConfig::default())
    }
}

impl ConversationRunner {
    pub fn new(config: &DialogueConfig) -> Self {
        Self {
            exit_phrases: config.exit_phrases.clone(),
            max_listen_failures: config.max_listen_failures.max(1),
        }
    }

    /// Whether `input`, trimmed, is one of the configured exit phrases.
    pub fn is_exit_phrase(&self, input: &str) -> bool {
        let input = input.trim();
        self.exit_phrases.iter().any(|phrase| phrase == input)
    }

    /// Drive `controller` until it ends or the user leaves.
    ///
    /// Blank utterances are ignored. A failed listen is answered with the
    /// error prompt and retried, up to the configured limit.
    pub fn run<V: VoiceIo>(
        &self,
        controller: &mut DialogueController,
        voice: &mut V,
    ) -> ConversationOutcome {
        info!(session_id = %controller.session_id(), "Conversation started");
        let opening = controller.process("");
        voice.speak(&opening);

        let mut turns = 0;
        let mut failures = 0;

        let reason = loop {
            if controller.state() == ConversationState::End {
                break EndReason::Completed;
            }

            let input = match voice.listen() {
                Ok(Some(input)) => {
                    failures = 0;
                    input
                }
                Ok(None) => break EndReason::InputClosed,
                Err(e) => {
                    failures += 1;
                    warn!(attempt = failures, error = %e, "Listening failed");
                    if failures >= self.max_listen_failures {
                        break EndReason::TooManyFailures;
                    }
                    voice.speak(prompts::ERROR);
                    continue;
                }
            };

            if input.trim().is_empty() {
                debug!("Blank utterance ignored");
                continue;
            }

            if self.is_exit_phrase(&input) {
                voice.speak(prompts::THANK_YOU);
                break EndReason::ExitPhrase;
            }

            let response = controller.process(&input);
            turns += 1;
            voice.speak(&response);

            if controller.evaluate() == Evaluation::Stuck {
                warn!(state = %controller.state(), "Conversation appears stuck");
            }
        };

        let outcome = ConversationOutcome {
            turns,
            reason,
            final_state: controller.state(),
        };
        info!(
            turns = outcome.turns,
            reason = ?outcome.reason,
            final_state = %outcome.final_state,
            "Conversation finished"
        );
        outcome
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::ScriptedVoice;

    fn run_script(inputs: &[&str]) -> (ConversationOutcome, ScriptedVoice, DialogueController) {
        let mut controller = DialogueController::default();
        let mut voice = ScriptedVoice::new(inputs.iter().copied());
        let outcome = ConversationRunner::default().run(&mut controller, &mut voice);
        (outcome, voice, controller)
    }

    #[test]
    fn test_demo_script() {
        let (outcome, voice, controller) = run_script(DEMO_SCRIPT);

        assert_eq!(outcome.turns, 4);
        assert_eq!(outcome.reason, EndReason::ExitPhrase);
        assert_eq!(outcome.final_state, ConversationState::Recommend);

        let spoken = voice.spoken();
        assert_eq!(spoken[0], prompts::opening());
        assert_eq!(spoken[1], prompts::ASK_AGE);
        assert_eq!(spoken[2], prompts::ASK_INCOME);
        assert_eq!(spoken[3], prompts::PROCESSING);
        assert_eq!(spoken[4], "మీకు 3 పథకాలు అర్హత ఉన్నాయి");
        assert_eq!(spoken[5], prompts::THANK_YOU);
        assert_eq!(spoken.len(), 6);

        let profile = controller.memory().get_user_profile();
        assert_eq!(profile.age, Some(35));
        assert_eq!(profile.income, None);
    }

    #[test]
    fn test_full_conversation_completes() {
        let (outcome, voice, controller) = run_script(&[
            "నేను రైతుని",
            "35 సంవత్సరాలు",
            "40 వేలు",
            "సరే",
            "చెప్పండి",
            "ఇంకా ఏమైనా",
        ]);
        assert_eq!(outcome.reason, EndReason::Completed);
        assert_eq!(outcome.turns, 5);
        assert_eq!(outcome.final_state, ConversationState::End);
        assert_eq!(voice.remaining(), 1);
        assert_eq!(controller.last_recommendations().len(), 3);
    }

    #[test]
    fn test_input_closed() {
        let (outcome, _, _) = run_script(&["నేను రైతుని"]);
        assert_eq!(outcome.reason, EndReason::InputClosed);
        assert_eq!(outcome.turns, 1);
        assert_eq!(outcome.final_state, ConversationState::AskAge);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let (outcome, voice, controller) = run_script(&["", "   ", "నేను రైతుని"]);
        assert_eq!(outcome.turns, 1);
        assert_eq!(controller.memory().len(), 1);
        assert_eq!(voice.spoken().len(), 2);
    }

    #[test]
    fn test_exit_phrase_requires_exact_match() {
        let runner = ConversationRunner::default();
        assert!(runner.is_exit_phrase("ధన్యవాదాలు"));
        assert!(runner.is_exit_phrase("  బై "));
        assert!(!runner.is_exit_phrase("సరే ధన్యవాదాలు"));
        assert!(!runner.is_exit_phrase(""));
    }

    #[test]
    fn test_listen_failures_are_retried() {
        let mut controller = DialogueController::default();
        let mut voice = ScriptedVoice::new(["నేను రైతుని"]).fail_next(2);
        let outcome = ConversationRunner::default().run(&mut controller, &mut voice);

        assert_eq!(outcome.reason, EndReason::InputClosed);
        assert_eq!(outcome.turns, 1);
        let errors = voice
            .spoken()
            .iter()
            .filter(|s| s.as_str() == prompts::ERROR)
            .count();
        assert_eq!(errors, 2);
    }

    #[test]
    fn test_too_many_failures_gives_up() {
        let mut controller = DialogueController::default();
        let mut voice = ScriptedVoice::new(["నేను రైతుని"]).fail_next(3);
        let outcome = ConversationRunner::default().run(&mut controller, &mut voice);

        assert_eq!(outcome.reason, EndReason::TooManyFailures);
        assert_eq!(outcome.turns, 0);
        assert_eq!(voice.remaining(), 1);
        assert_eq!(outcome.final_state, ConversationState::AskOccupation);
    }

    #[test]
    fn test_custom_exit_phrases() {
        let config = DialogueConfig {
            exit_phrases: vec!["stop".to_string()],
            ..DialogueConfig::default()
        };
        let runner = ConversationRunner::new(&config);
        let mut controller = DialogueController::default();
        let mut voice = ScriptedVoice::new(["ధన్యవాదాలు", "stop"]);
        let outcome = runner.run(&mut controller, &mut voice);

        assert_eq!(outcome.reason, EndReason::ExitPhrase);
        assert_eq!(outcome.turns, 1);
    }

    #[test]
    fn test_outcome_serializes() {
        let (outcome, _, _) = run_script(DEMO_SCRIPT);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["reason"], "exit_phrase");
        assert_eq!(json["final_state"], "RECOMMEND");
        assert_eq!(json["turns"], 4);
    }
}
