//! Core domain types shared across the Sahayak crates.
//!
//! Facts, the user profile they accumulate into, conversation states, and
//! the immutable records kept by conversation memory.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Occupation
// =============================================================================

/// Occupations the agent recognises in user speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Farmer,
    Employee,
    Student,
    Business,
}

impl Occupation {
    /// All occupations, in vocabulary order.
    pub const ALL: [Occupation; 4] = [
        Occupation::Farmer,
        Occupation::Employee,
        Occupation::Student,
        Occupation::Business,
    ];

    /// Machine identifier used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Farmer => "farmer",
            Occupation::Employee => "employee",
            Occupation::Student => "student",
            Occupation::Business => "business",
        }
    }

    /// The Telugu word a user says for this occupation.
    pub fn spoken(&self) -> &'static str {
        match self {
            Occupation::Farmer => "రైతు",
            Occupation::Employee => "ఉద్యోగి",
            Occupation::Student => "విద్యార్థి",
            Occupation::Business => "వ్యాపారం",
        }
    }

    /// Look up an occupation by its exact spoken form.
    pub fn from_spoken(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.spoken() == word)
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spoken())
    }
}

impl std::str::FromStr for Occupation {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(trimmed))
            .or_else(|| Self::from_spoken(trimmed))
            .ok_or_else(|| format!("Unknown occupation: {}", s))
    }
}

// =============================================================================
// Facts
// =============================================================================

/// Keys of the user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKey {
    Age,
    Income,
    Occupation,
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactKey::Age => write!(f, "age"),
            FactKey::Income => write!(f, "income"),
            FactKey::Occupation => write!(f, "occupation"),
        }
    }
}

/// A typed value extracted from user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Fact {
    /// Age in years.
    Age(u32),
    /// Annual income in rupees.
    Income(u64),
    Occupation(Occupation),
}

impl Fact {
    /// The profile key this fact is stored under.
    pub fn key(&self) -> FactKey {
        match self {
            Fact::Age(_) => FactKey::Age,
            Fact::Income(_) => FactKey::Income,
            Fact::Occupation(_) => FactKey::Occupation,
        }
    }
}

/// Displays only the value, the way it is quoted back to the user.
impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Age(age) => write!(f, "{}", age),
            Fact::Income(income) => write!(f, "{}", income),
            Fact::Occupation(occupation) => write!(f, "{}", occupation),
        }
    }
}

// =============================================================================
// UserProfile
// =============================================================================

/// Current value of every fact known about the user.
///
/// A field that is `None` has never been stated. Fields are overwritten by
/// newer statements and are only reset by clearing the whole memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub income: Option<u64>,
    pub occupation: Option<Occupation>,
}

impl UserProfile {
    /// Read the stored fact for `key`, if any.
    pub fn get(&self, key: FactKey) -> Option<Fact> {
        match key {
            FactKey::Age => self.age.map(Fact::Age),
            FactKey::Income => self.income.map(Fact::Income),
            FactKey::Occupation => self.occupation.map(Fact::Occupation),
        }
    }

    /// Store `fact`, returning the value it replaced.
    pub fn set(&mut self, fact: Fact) -> Option<Fact> {
        let previous = self.get(fact.key());
        match fact {
            Fact::Age(age) => self.age = Some(age),
            Fact::Income(income) => self.income = Some(income),
            Fact::Occupation(occupation) => self.occupation = Some(occupation),
        }
        previous
    }

    /// Number of keys that have a value.
    pub fn len(&self) -> usize {
        [
            self.age.is_some(),
            self.income.is_some(),
            self.occupation.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Age for rule evaluation; an unknown age counts as 0.
    pub fn age_or_default(&self) -> u32 {
        self.age.unwrap_or(0)
    }

    /// Income for rule evaluation; an unknown income counts as 0.
    pub fn income_or_default(&self) -> u64 {
        self.income.unwrap_or(0)
    }
}

// =============================================================================
// ConversationState
// =============================================================================

/// Position of the dialogue controller in the question sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    Start,
    AskOccupation,
    AskAge,
    AskIncome,
    CheckEligibility,
    Recommend,
    End,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationState::Start => write!(f, "START"),
            ConversationState::AskOccupation => write!(f, "ASK_OCCUPATION"),
            ConversationState::AskAge => write!(f, "ASK_AGE"),
            ConversationState::AskIncome => write!(f, "ASK_INCOME"),
            ConversationState::CheckEligibility => write!(f, "CHECK_ELIGIBILITY"),
            ConversationState::Recommend => write!(f, "RECOMMEND"),
            ConversationState::End => write!(f, "END"),
        }
    }
}

impl ConversationState {
    /// Returns whether a transition from `self` to `target` is valid.
    ///
    /// Every state only moves forward; eligibility checking may skip
    /// straight to `End` when nothing matches.
    pub fn can_transition_to(&self, target: &ConversationState) -> bool {
        matches!(
            (self, target),
            (ConversationState::Start, ConversationState::AskOccupation)
                | (ConversationState::AskOccupation, ConversationState::AskAge)
                | (ConversationState::AskAge, ConversationState::AskIncome)
                | (ConversationState::AskIncome, ConversationState::CheckEligibility)
                | (ConversationState::CheckEligibility, ConversationState::Recommend)
                | (ConversationState::CheckEligibility, ConversationState::End)
                | (ConversationState::Recommend, ConversationState::End)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationState::End)
    }
}

// =============================================================================
// Memory records
// =============================================================================

/// One user turn as recorded by conversation memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub timestamp: DateTime<Local>,
    /// Raw text the user said.
    pub user: String,
    /// What the agent had asked when the user answered.
    pub agent: String,
    pub state: ConversationState,
}

/// A newly stated fact that disagrees with the stored one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contradiction {
    pub field: FactKey,
    pub old: Fact,
    pub new: Fact,
    pub time: DateTime<Local>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Occupation ----

    #[test]
    fn test_occupation_spoken_roundtrip() {
        for occupation in Occupation::ALL {
            assert_eq!(Occupation::from_spoken(occupation.spoken()), Some(occupation));
        }
    }

    #[test]
    fn test_occupation_from_str_accepts_identifier_and_spoken() {
        assert_eq!("farmer".parse::<Occupation>(), Ok(Occupation::Farmer));
        assert_eq!("Student".parse::<Occupation>(), Ok(Occupation::Student));
        assert_eq!("ఉద్యోగి".parse::<Occupation>(), Ok(Occupation::Employee));
        assert!("astronaut".parse::<Occupation>().is_err());
    }

    #[test]
    fn test_occupation_display_is_spoken_form() {
        assert_eq!(Occupation::Farmer.to_string(), "రైతు");
        assert_eq!(Occupation::Business.to_string(), "వ్యాపారం");
    }

    // ---- Fact ----

    #[test]
    fn test_fact_key() {
        assert_eq!(Fact::Age(30).key(), FactKey::Age);
        assert_eq!(Fact::Income(1000).key(), FactKey::Income);
        assert_eq!(Fact::Occupation(Occupation::Farmer).key(), FactKey::Occupation);
    }

    #[test]
    fn test_fact_display_is_value_only() {
        assert_eq!(Fact::Age(35).to_string(), "35");
        assert_eq!(Fact::Income(200000).to_string(), "200000");
        assert_eq!(Fact::Occupation(Occupation::Farmer).to_string(), "రైతు");
    }

    #[test]
    fn test_fact_serializes_tagged() {
        let json = serde_json::to_value(Fact::Age(30)).unwrap();
        assert_eq!(json["key"], "age");
        assert_eq!(json["value"], 30);
    }

    // ---- UserProfile ----

    #[test]
    fn test_profile_default_is_empty() {
        let profile = UserProfile::default();
        assert!(profile.is_empty());
        assert_eq!(profile.age_or_default(), 0);
        assert_eq!(profile.income_or_default(), 0);
        assert!(profile.get(FactKey::Occupation).is_none());
    }

    #[test]
    fn test_profile_set_returns_previous() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.set(Fact::Age(30)), None);
        assert_eq!(profile.set(Fact::Age(35)), Some(Fact::Age(30)));
        assert_eq!(profile.get(FactKey::Age), Some(Fact::Age(35)));
        assert_eq!(profile.len(), 1);
    }

    #[test]
    fn test_profile_len_counts_present_keys() {
        let mut profile = UserProfile::default();
        profile.set(Fact::Income(50_000));
        profile.set(Fact::Occupation(Occupation::Student));
        assert_eq!(profile.len(), 2);
        assert!(!profile.is_empty());
    }

    // ---- ConversationState ----

    #[test]
    fn test_state_display() {
        assert_eq!(ConversationState::Start.to_string(), "START");
        assert_eq!(ConversationState::AskOccupation.to_string(), "ASK_OCCUPATION");
        assert_eq!(ConversationState::CheckEligibility.to_string(), "CHECK_ELIGIBILITY");
        assert_eq!(ConversationState::End.to_string(), "END");
    }

    #[test]
    fn test_state_serializes_like_display() {
        let json = serde_json::to_string(&ConversationState::AskIncome).unwrap();
        assert_eq!(json, "\"ASK_INCOME\"");
    }

    #[test]
    fn test_forward_transitions_valid() {
        use ConversationState::*;
        assert!(Start.can_transition_to(&AskOccupation));
        assert!(AskOccupation.can_transition_to(&AskAge));
        assert!(AskAge.can_transition_to(&AskIncome));
        assert!(AskIncome.can_transition_to(&CheckEligibility));
        assert!(CheckEligibility.can_transition_to(&Recommend));
        assert!(CheckEligibility.can_transition_to(&End));
        assert!(Recommend.can_transition_to(&End));
    }

    #[test]
    fn test_end_has_no_outgoing_transitions() {
        use ConversationState::*;
        let all = [
            Start,
            AskOccupation,
            AskAge,
            AskIncome,
            CheckEligibility,
            Recommend,
            End,
        ];
        for target in &all {
            assert!(!End.can_transition_to(target));
        }
        assert!(End.is_terminal());
        assert!(!Recommend.is_terminal());
    }

    #[test]
    fn test_backward_and_skip_transitions_invalid() {
        use ConversationState::*;
        assert!(!AskAge.can_transition_to(&AskOccupation));
        assert!(!Start.can_transition_to(&AskAge));
        assert!(!AskIncome.can_transition_to(&Recommend));
        assert!(!AskOccupation.can_transition_to(&AskOccupation));
    }
}
