//! Dialogue controller: the question-sequencing state machine.
//!
//! START -> ASK_OCCUPATION -> ASK_AGE -> ASK_INCOME -> CHECK_ELIGIBILITY
//! -> RECOMMEND -> END, with CHECK_ELIGIBILITY jumping to END when nothing
//! matches. ASK_OCCUPATION and ASK_AGE hold their position while the memory
//! has a contradiction for the field they ask about.

use tracing::{debug, info};
use uuid::Uuid;

use sahayak_core::catalog::Scheme;
use sahayak_core::config::SahayakConfig;
use sahayak_core::types::{ConversationState, FactKey};

use crate::eligibility::EligibilityEngine;
use crate::error::DialogueError;
use crate::evaluator::{ConversationEvaluator, Evaluation};
use crate::memory::ConversationMemory;
use crate::planner::{NextActionPlanner, PlannedAction, PlanningContext};
use crate::prompts;
use crate::recommend::{Recommendation, RecommendationEngine};

/// Drives one conversation, turn by turn.
#[derive(Debug)]
pub struct DialogueController {
    session_id: Uuid,
    state: ConversationState,
    memory: ConversationMemory,
    eligibility: EligibilityEngine,
    recommender: RecommendationEngine,
    evaluator: ConversationEvaluator,
    planner: NextActionPlanner,
    eligible: Vec<Scheme>,
    recommendations: Vec<Recommendation>,
    eligibility_checked: bool,
    recommended: bool,
}

impl Default for DialogueController {
    fn default() -> Self {
        Self::new(EligibilityEngine::default(), RecommendationEngine::default())
    }
}

impl DialogueController {
    /// Create a controller in `START` with an empty memory.
    pub fn new(eligibility: EligibilityEngine, recommender: RecommendationEngine) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, schemes = eligibility.catalog().len(), "Dialogue controller ready");
        Self {
            session_id,
            state: ConversationState::Start,
            memory: ConversationMemory::new(),
            eligibility,
            recommender,
            evaluator: ConversationEvaluator,
            planner: NextActionPlanner,
            eligible: Vec::new(),
            recommendations: Vec::new(),
            eligibility_checked: false,
            recommended: false,
        }
    }

    /// Build a controller from the catalog and weights in `config`.
    pub fn from_config(config: &SahayakConfig) -> Result<Self, DialogueError> {
        let catalog = config.scheme_catalog()?;
        Ok(Self::new(
            EligibilityEngine::new(catalog),
            RecommendationEngine::new(config.recommend.clone()),
        ))
    }

    /// Handle one user turn and return what the agent says next.
    pub fn process(&mut self, user_input: &str) -> String {
        debug!(session_id = %self.session_id, state = %self.state, "Processing turn");
        match self.state {
            ConversationState::Start => self.handle_start(),
            ConversationState::AskOccupation => self.handle_ask_occupation(user_input),
            ConversationState::AskAge => self.handle_ask_age(user_input),
            ConversationState::AskIncome => self.handle_ask_income(user_input),
            ConversationState::CheckEligibility => self.handle_check_eligibility(),
            ConversationState::Recommend => self.handle_recommend(),
            ConversationState::End => prompts::THANK_YOU.to_string(),
        }
    }

    // -----------------------------------------------------------------
    // State handlers
    // -----------------------------------------------------------------

    fn handle_start(&mut self) -> String {
        self.transition(ConversationState::AskOccupation);
        prompts::opening()
    }

    fn handle_ask_occupation(&mut self, user_input: &str) -> String {
        self.memory
            .add_interaction(user_input, prompts::ASK_OCCUPATION, self.state);
        if let Some(response) = self.contradiction_prompt(FactKey::Occupation) {
            return response;
        }
        self.transition(ConversationState::AskAge);
        prompts::ASK_AGE.to_string()
    }

    fn handle_ask_age(&mut self, user_input: &str) -> String {
        self.memory
            .add_interaction(user_input, prompts::ASK_AGE, self.state);
        if let Some(response) = self.contradiction_prompt(FactKey::Age) {
            return response;
        }
        self.transition(ConversationState::AskIncome);
        prompts::ASK_INCOME.to_string()
    }

    // Income contradictions are recorded by memory but do not hold this state.
    fn handle_ask_income(&mut self, user_input: &str) -> String {
        self.memory
            .add_interaction(user_input, prompts::ASK_INCOME, self.state);
        self.transition(ConversationState::CheckEligibility);
        prompts::PROCESSING.to_string()
    }

    fn handle_check_eligibility(&mut self) -> String {
        let profile = self.memory.get_user_profile();
        let eligible = self.eligibility.check(&profile);
        self.eligibility_checked = true;

        if eligible.is_empty() {
            info!(session_id = %self.session_id, "No eligible schemes");
            self.transition(ConversationState::End);
            return prompts::NOT_ELIGIBLE.to_string();
        }

        let count = eligible.len();
        info!(session_id = %self.session_id, eligible = count, "Eligible schemes found");
        self.eligible = eligible;
        self.transition(ConversationState::Recommend);
        prompts::eligible_count(count)
    }

    fn handle_recommend(&mut self) -> String {
        let profile = self.memory.get_user_profile();
        let recommendations = self.recommender.recommend(&self.eligible, &profile);
        let response = prompts::recommendations(&recommendations);
        self.recommendations = recommendations;
        self.recommended = true;
        self.transition(ConversationState::End);
        response
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    fn contradiction_prompt(&self, field: FactKey) -> Option<String> {
        self.memory.contradiction_for(field).map(|c| {
            debug!(%field, state = %self.state, "Holding state on contradiction");
            prompts::contradiction(&c.old, &c.new)
        })
    }

    fn transition(&mut self, target: ConversationState) {
        debug_assert!(
            self.state.can_transition_to(&target),
            "invalid dialogue transition {} -> {}",
            self.state,
            target
        );
        debug!("Dialogue state: {} -> {}", self.state, target);
        self.state = target;
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Schemes found by the last eligibility check.
    pub fn eligible_schemes(&self) -> &[Scheme] {
        &self.eligible
    }

    /// Recommendations produced in `RECOMMEND`, empty before that.
    pub fn last_recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Assess the conversation so far.
    pub fn evaluate(&self) -> Evaluation {
        self.evaluator
            .evaluate(self.memory.history(), self.memory.get_contradictions())
    }

    /// Decide the next high-level action from current progress.
    pub fn plan_next(&self) -> PlannedAction {
        let context = PlanningContext {
            has_profile: !self.memory.get_user_profile().is_empty(),
            eligibility_checked: self.eligibility_checked,
            eligible_schemes: self.eligible.len(),
            recommendations_given: self.recommended,
        };
        self.planner.decide_next_action(&context)
    }

    /// Forget everything and go back to `START`.
    pub fn reset(&mut self) {
        info!(session_id = %self.session_id, from = %self.state, "Dialogue reset to START");
        self.memory.clear();
        self.state = ConversationState::Start;
        self.eligible.clear();
        self.recommendations.clear();
        self.eligibility_checked = false;
        self.recommended = false;
    }
}

// =============================================================================
// Tests
// =============================================================================
