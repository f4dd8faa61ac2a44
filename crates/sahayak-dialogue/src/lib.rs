//! Dialogue engine for the Sahayak welfare-scheme agent.
//!
//! A finite-state controller walks the user through occupation, age and
//! income questions. Conversation memory extracts typed facts from each
//! answer and flags contradictions; two rule engines then pick eligible
//! schemes and rank them.

pub mod controller;
pub mod eligibility;
pub mod error;
pub mod evaluator;
pub mod extractor;
pub mod memory;
pub mod planner;
pub mod prompts;
pub mod recommend;
pub mod session;
pub mod voice;

pub use controller::DialogueController;
pub use eligibility::EligibilityEngine;
pub use error::DialogueError;
pub use evaluator::{ConversationEvaluator, Evaluation};
pub use extractor::FactExtractor;
pub use memory::ConversationMemory;
pub use planner::{ActionPriority, NextAction, NextActionPlanner, PlannedAction, PlanningContext};
pub use recommend::{Priority, Recommendation, RecommendationEngine};
pub use session::{ConversationOutcome, ConversationRunner, EndReason, DEMO_SCRIPT};
pub use voice::{ScriptedVoice, VoiceIo};
