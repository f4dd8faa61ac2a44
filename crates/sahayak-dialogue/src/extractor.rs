//! Keyword-based fact extraction from free-form user text.
//!
//! Recognises three kinds of fact:
//! - age: a number followed by an age keyword ("35 సంవత్సరాలు")
//! - income: a number followed by a unit keyword ("2 లక్షలు", "50 వేలు")
//! - occupation: any occupation word appearing in the text
//!
//! Matching is a plain scan over the keyword constants below. Text that
//! matches nothing simply yields no facts.

use sahayak_core::types::{Fact, Occupation};

// =============================================================================
// Vocabulary
// =============================================================================

/// Keywords that mark the preceding number as an age.
pub const AGE_KEYWORDS: &[&str] = &["సంవత్సరాలు", "వయస్సు", "యేర్స్"];

/// "lakh": scales the preceding number by [`LAKH`].
pub const LAKH_KEYWORD: &str = "లక్ష";
/// "thousand": scales the preceding number by [`THOUSAND`].
pub const THOUSAND_KEYWORD: &str = "వేలు";
/// "income": treated as thousands as well.
pub const INCOME_KEYWORD: &str = "ఆదాయం";

/// Keywords that mark the preceding number as an income amount.
pub const INCOME_KEYWORDS: &[&str] = &[LAKH_KEYWORD, THOUSAND_KEYWORD, INCOME_KEYWORD];

/// Occupation words, in match priority order.
pub const OCCUPATION_KEYWORDS: &[&str] = &["రైతు", "ఉద్యోగి", "విద్యార్థి", "వ్యాపారం"];

pub const LAKH: u64 = 100_000;
pub const THOUSAND: u64 = 1_000;

// =============================================================================
// FactExtractor
// =============================================================================

/// Stateless extractor turning one utterance into zero or more facts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactExtractor;

impl FactExtractor {
    /// Extract every fact present in `text`, in the order age, income,
    /// occupation.
    pub fn extract(&self, text: &str) -> Vec<Fact> {
        let mut facts = Vec::with_capacity(3);
        if let Some(age) = self.extract_age(text) {
            facts.push(Fact::Age(age));
        }
        if let Some(income) = self.extract_income(text) {
            facts.push(Fact::Income(income));
        }
        if let Some(occupation) = self.extract_occupation(text) {
            facts.push(Fact::Occupation(occupation));
        }
        facts
    }

    /// The first number directly followed by an age keyword.
    pub fn extract_age(&self, text: &str) -> Option<u32> {
        let (value, _) = number_before_keyword(text, AGE_KEYWORDS)?;
        u32::try_from(value).ok()
    }

    /// The first number directly followed by an income unit, scaled to rupees.
    pub fn extract_income(&self, text: &str) -> Option<u64> {
        let (value, unit) = number_before_keyword(text, INCOME_KEYWORDS)?;
        let scale = if unit == LAKH_KEYWORD { LAKH } else { THOUSAND };
        value.checked_mul(scale)
    }

    /// The first occupation word (in vocabulary order) found anywhere in `text`.
    pub fn extract_occupation(&self, text: &str) -> Option<Occupation> {
        OCCUPATION_KEYWORDS
            .iter()
            .find(|word| text.contains(**word))
            .and_then(|word| Occupation::from_spoken(word))
    }
}

// =============================================================================
// Scanner
// =============================================================================

/// Code points of the digit zero in the decimal digit blocks the scanner
/// accepts. Each block holds ten consecutive digits.
const DIGIT_ZEROS: &[u32] = &[
    0x0030, // ASCII
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0xFF10, // Fullwidth
];

/// Value of a decimal digit from any block in [`DIGIT_ZEROS`].
fn digit_value(c: char) -> Option<u64> {
    let code = u32::from(c);
    DIGIT_ZEROS
        .iter()
        .find(|zero| (**zero..**zero + 10).contains(&code))
        .map(|zero| u64::from(code - zero))
}

/// Find the first run of digits that is followed, after optional
/// whitespace, by one of `keywords`.
///
/// A run that matches a keyword but overflows `u64` ends the search with
/// `None` rather than falling through to a later run.
fn number_before_keyword<'k>(text: &str, keywords: &[&'k str]) -> Option<(u64, &'k str)> {
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let Some(first) = digit_value(c) else {
            continue;
        };

        let mut value = Some(first);
        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            let Some(digit) = digit_value(next) else {
                break;
            };
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(digit));
            end = idx + next.len_utf8();
            chars.next();
        }

        let rest = text[end..].trim_start();
        if let Some(keyword) = keywords.iter().find(|k| rest.starts_with(**k)) {
            return value.map(|v| (v, *keyword));
        }
    }

    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FactExtractor {
        FactExtractor
    }

    // ---- Vocabulary ----

    #[test]
    fn test_every_occupation_keyword_maps_to_an_occupation() {
        for word in OCCUPATION_KEYWORDS {
            let occupation = Occupation::from_spoken(word);
            assert!(occupation.is_some(), "unmapped occupation word: {}", word);
        }
        assert_eq!(OCCUPATION_KEYWORDS.len(), Occupation::ALL.len());
    }

    #[test]
    fn test_every_age_keyword_is_recognised() {
        for keyword in AGE_KEYWORDS {
            let text = format!("42 {}", keyword);
            assert_eq!(extractor().extract_age(&text), Some(42), "keyword {}", keyword);
        }
    }

    #[test]
    fn test_every_income_keyword_is_recognised() {
        for keyword in INCOME_KEYWORDS {
            let text = format!("3 {}", keyword);
            let expected = if *keyword == LAKH_KEYWORD { 300_000 } else { 3_000 };
            assert_eq!(extractor().extract_income(&text), Some(expected));
        }
    }

    // ---- Age ----

    #[test]
    fn test_age_in_sentence() {
        assert_eq!(extractor().extract_age("నా వయస్సు 35 సంవత్సరాలు"), Some(35));
    }

    #[test]
    fn test_age_without_space() {
        assert_eq!(extractor().extract_age("30సంవత్సరాలు"), Some(30));
    }

    #[test]
    fn test_age_requires_keyword_after_number() {
        // Keyword before the number does not count.
        assert_eq!(extractor().extract_age("వయస్సు 35"), None);
    }

    #[test]
    fn test_age_skips_numbers_without_keyword() {
        assert_eq!(extractor().extract_age("2024 లో నాకు 41 సంవత్సరాలు"), Some(41));
    }

    #[test]
    fn test_age_telugu_digits() {
        assert_eq!(extractor().extract_age("౩౫ సంవత్సరాలు"), Some(35));
    }

    #[test]
    fn test_age_devanagari_digits() {
        assert_eq!(extractor().extract_age("३५ సంవత్సరాలు"), Some(35));
    }

    #[test]
    fn test_income_mixed_digit_scripts() {
        assert_eq!(extractor().extract_income("౨5 వేలు"), Some(25_000));
        assert_eq!(extractor().extract_income("２ లక్షలు"), Some(200_000));
    }

    #[test]
    fn test_digit_blocks_hold_ten_digits() {
        for zero in DIGIT_ZEROS {
            for offset in 0..10u32 {
                let c = char::from_u32(zero + offset).unwrap();
                assert_eq!(digit_value(c), Some(u64::from(offset)));
            }
            let past = char::from_u32(zero + 10).unwrap();
            assert_eq!(digit_value(past), None, "U+{:04X}", zero + 10);
        }
    }

    #[test]
    fn test_age_overflow_yields_nothing() {
        assert_eq!(extractor().extract_age("99999999999 సంవత్సరాలు"), None);
    }

    #[test]
    fn test_age_separating_word_is_not_bridged() {
        assert_eq!(extractor().extract_age("35 నా సంవత్సరాలు"), None);
    }

    // ---- Income ----

    #[test]
    fn test_income_lakh_plural() {
        assert_eq!(extractor().extract_income("నా ఆదాయం 2 లక్షలు"), Some(200_000));
    }

    #[test]
    fn test_income_thousands() {
        assert_eq!(extractor().extract_income("40 వేలు"), Some(40_000));
    }

    #[test]
    fn test_income_generic_keyword_scales_by_thousand() {
        assert_eq!(extractor().extract_income("50 ఆదాయం"), Some(50_000));
    }

    #[test]
    fn test_income_bare_number_is_not_extracted() {
        assert_eq!(extractor().extract_income("నా ఆదాయం 50000"), None);
    }

    #[test]
    fn test_income_overflow_after_scaling_yields_nothing() {
        let text = format!("{} లక్ష", u64::MAX / 10);
        assert_eq!(extractor().extract_income(&text), None);
    }

    // ---- Occupation ----

    #[test]
    fn test_occupation_substring() {
        assert_eq!(
            extractor().extract_occupation("నేను రైతుని"),
            Some(Occupation::Farmer)
        );
    }

    #[test]
    fn test_occupation_first_vocabulary_match_wins() {
        // Both words present; vocabulary order decides.
        assert_eq!(
            extractor().extract_occupation("విద్యార్థి కానీ ఇప్పుడు ఉద్యోగి"),
            Some(Occupation::Employee)
        );
    }

    #[test]
    fn test_occupation_absent() {
        assert_eq!(extractor().extract_occupation("నమస్కారం"), None);
    }

    // ---- Combined ----

    #[test]
    fn test_extract_all_facts_in_one_utterance() {
        let facts = extractor().extract("నేను రైతు, 45 సంవత్సరాలు, 1 లక్ష ఆదాయం");
        assert_eq!(
            facts,
            vec![
                Fact::Age(45),
                Fact::Income(100_000),
                Fact::Occupation(Occupation::Farmer),
            ]
        );
    }

    #[test]
    fn test_extract_nothing_from_noise() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("hello 123 world").is_empty());
    }

    #[test]
    fn test_age_keyword_number_not_reused_as_income() {
        let facts = extractor().extract("35 సంవత్సరాలు");
        assert_eq!(facts, vec![Fact::Age(35)]);
    }
}
