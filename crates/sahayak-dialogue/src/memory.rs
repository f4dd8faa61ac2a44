//! Conversation memory: interaction log, fact table, contradiction list.
//!
//! Every recorded interaction is run through the [`FactExtractor`]; facts
//! overwrite earlier values, and an overwrite with a different value is
//! recorded as a [`Contradiction`] first.

use chrono::Local;
use tracing::{debug, info, warn};

use sahayak_core::types::{
    Contradiction, ConversationState, Fact, FactKey, Interaction, UserProfile,
};

use crate::extractor::FactExtractor;

/// Append-only memory of a single conversation.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    history: Vec<Interaction>,
    facts: UserProfile,
    contradictions: Vec<Contradiction>,
    extractor: FactExtractor,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one turn and store the facts extracted from `user`.
    ///
    /// Returns the facts that were extracted, in storage order.
    pub fn add_interaction(
        &mut self,
        user: &str,
        agent: &str,
        state: ConversationState,
    ) -> Vec<Fact> {
        self.history.push(Interaction {
            timestamp: Local::now(),
            user: user.to_string(),
            agent: agent.to_string(),
            state,
        });

        let facts = self.extractor.extract(user);
        for fact in &facts {
            self.store_fact(*fact);
        }

        debug!(
            interactions = self.history.len(),
            facts = facts.len(),
            state = %state,
            "Interaction recorded"
        );
        facts
    }

    /// Store a fact, recording a contradiction if it replaces a different value.
    ///
    /// The new value is stored either way. Returns the contradiction that was
    /// recorded, if any.
    pub fn store_fact(&mut self, fact: Fact) -> Option<&Contradiction> {
        let previous = self.facts.set(fact);
        match previous {
            Some(old) if old != fact => {
                warn!(field = %fact.key(), old = %old, new = %fact, "Contradiction detected");
                self.contradictions.push(Contradiction {
                    field: fact.key(),
                    old,
                    new: fact,
                    time: Local::now(),
                });
                self.contradictions.last()
            }
            _ => {
                debug!(field = %fact.key(), value = %fact, "Fact stored");
                None
            }
        }
    }

    /// Every contradiction recorded so far, oldest first.
    pub fn get_contradictions(&self) -> &[Contradiction] {
        &self.contradictions
    }

    /// The earliest contradiction recorded for `field`.
    pub fn contradiction_for(&self, field: FactKey) -> Option<&Contradiction> {
        self.contradictions.iter().find(|c| c.field == field)
    }

    /// A copy of the current fact table.
    pub fn get_user_profile(&self) -> UserProfile {
        self.facts.clone()
    }

    /// The most recent `last_n` interactions in chronological order.
    pub fn get_history(&self, last_n: usize) -> &[Interaction] {
        let start = self.history.len().saturating_sub(last_n);
        &self.history[start..]
    }

    /// The full interaction log.
    pub fn history(&self) -> &[Interaction] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop all history, facts and contradictions.
    pub fn clear(&mut self) {
        info!(
            interactions = self.history.len(),
            contradictions = self.contradictions.len(),
            "Conversation memory cleared"
        );
        self.history.clear();
        self.facts = UserProfile::default();
        self.contradictions.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
