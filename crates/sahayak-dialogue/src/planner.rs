//! Next-action planning from conversation progress.

use serde::Serialize;

/// Tool name of the eligibility engine.
pub const ELIGIBILITY_TOOL: &str = "eligibility_checker";
/// Tool name of the recommendation engine.
pub const RECOMMENDER_TOOL: &str = "scheme_recommender";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    CollectInformation,
    CheckEligibility,
    RecommendSchemes,
    AskForNextStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    Low,
    Medium,
    High,
}

/// What the agent should do next, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub action: NextAction,
    pub reason: &'static str,
    /// Tool the action calls, if any.
    pub tool: Option<&'static str>,
    pub priority: ActionPriority,
}

/// Snapshot of conversation progress the planner decides from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanningContext {
    /// At least one profile fact is known.
    pub has_profile: bool,
    pub eligibility_checked: bool,
    pub eligible_schemes: usize,
    pub recommendations_given: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NextActionPlanner;

impl NextActionPlanner {
    pub fn decide_next_action(&self, context: &PlanningContext) -> PlannedAction {
        if !context.has_profile {
            PlannedAction {
                action: NextAction::CollectInformation,
                reason: "యూజర్ ప్రొఫైల్ లేదు",
                tool: None,
                priority: ActionPriority::High,
            }
        } else if !context.eligibility_checked {
            PlannedAction {
                action: NextAction::CheckEligibility,
                reason: "అర్హత తనిఖీ అవసరం",
                tool: Some(ELIGIBILITY_TOOL),
                priority: ActionPriority::High,
            }
        } else if context.eligible_schemes > 0 && !context.recommendations_given {
            PlannedAction {
                action: NextAction::RecommendSchemes,
                reason: "పథకాలు సిఫార్సు చేయాలి",
                tool: Some(RECOMMENDER_TOOL),
                priority: ActionPriority::Medium,
            }
        } else {
            PlannedAction {
                action: NextAction::AskForNextStep,
                reason: "తదుపరి చర్య గురించి అడగాలి",
                tool: None,
                priority: ActionPriority::Low,
            }
        }
    }
}
