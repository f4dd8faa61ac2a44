//! Property tests for conversation memory over arbitrary turn sequences.

use proptest::prelude::*;

use sahayak_core::types::{ConversationState, Fact, FactKey, Occupation, UserProfile};
use sahayak_dialogue::ConversationMemory;

// =============================================================================
// Strategies
// =============================================================================

// Narrow ranges so sequences repeat and overwrite values often.
fn fact() -> impl Strategy<Value = Fact> {
    prop_oneof![
        (18u32..24).prop_map(Fact::Age),
        (1u64..6).prop_map(|thousands| Fact::Income(thousands * 1_000)),
        proptest::sample::select(Occupation::ALL.to_vec()).prop_map(Fact::Occupation),
    ]
}

/// A turn is either one spoken fact or filler that carries none.
fn turn() -> impl Strategy<Value = Option<Fact>> {
    prop_oneof![
        3 => fact().prop_map(Some),
        1 => Just(None),
    ]
}

fn utterance(turn: &Option<Fact>) -> String {
    match turn {
        Some(Fact::Age(age)) => format!("నా వయస్సు {} సంవత్సరాలు", age),
        Some(Fact::Income(income)) => format!("నా ఆదాయం {} వేలు", income / 1_000),
        Some(Fact::Occupation(occupation)) => format!("నేను {}", occupation.spoken()),
        None => "సరే అండి".to_string(),
    }
}

const STATES: [ConversationState; 3] = [
    ConversationState::AskOccupation,
    ConversationState::AskAge,
    ConversationState::AskIncome,
];

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn profile_holds_last_spoken_value_per_key(turns in prop::collection::vec(turn(), 0..40)) {
        let mut memory = ConversationMemory::new();
        let mut expected = UserProfile::default();

        for (i, turn) in turns.iter().enumerate() {
            let facts = memory.add_interaction(&utterance(turn), "ప్రశ్న", STATES[i % STATES.len()]);
            prop_assert_eq!(facts, turn.iter().copied().collect::<Vec<_>>());
            if let Some(fact) = turn {
                expected.set(*fact);
            }
        }

        prop_assert_eq!(memory.get_user_profile(), expected);
        prop_assert_eq!(memory.len(), turns.len());
    }

    #[test]
    fn contradictions_count_differing_overwrites(facts in prop::collection::vec(fact(), 0..60)) {
        let mut memory = ConversationMemory::new();
        let mut shadow = UserProfile::default();
        let mut differing = 0usize;
        let mut previous_len = 0usize;

        for fact in &facts {
            if let Some(old) = shadow.set(*fact) {
                if old != *fact {
                    differing += 1;
                }
            }
            let recorded = memory.store_fact(*fact).cloned();

            let len = memory.get_contradictions().len();
            prop_assert!(len >= previous_len);
            prop_assert_eq!(len, differing);
            if let Some(contradiction) = recorded {
                prop_assert_eq!(contradiction.field, fact.key());
                prop_assert_eq!(contradiction.new, *fact);
                prop_assert_ne!(contradiction.old, *fact);
            }
            previous_len = len;
        }

        for key in [FactKey::Age, FactKey::Income, FactKey::Occupation] {
            prop_assert_eq!(memory.get_user_profile().get(key), shadow.get(key));
        }
    }

    #[test]
    fn history_window_is_chronological_suffix(
        turns in prop::collection::vec(turn(), 0..30),
        last_n in 0usize..40,
    ) {
        let mut memory = ConversationMemory::new();
        for (i, turn) in turns.iter().enumerate() {
            memory.add_interaction(&utterance(turn), "ప్రశ్న", STATES[i % STATES.len()]);
        }

        let history = memory.history();
        let window = memory.get_history(last_n);
        let expected_len = last_n.min(history.len());

        prop_assert_eq!(window.len(), expected_len);
        prop_assert_eq!(window, &history[history.len() - expected_len..]);
        prop_assert!(window.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
