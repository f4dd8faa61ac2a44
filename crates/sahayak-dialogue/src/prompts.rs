//! Telugu prompts spoken by the agent.

use sahayak_core::types::Fact;

use crate::recommend::Recommendation;

pub const GREETING: &str =
    "నమస్కారం! నేను ప్రభుత్వ పథకాల సహాయకుడిని. మీరు ఏ పథకం గురించి తెలుసుకోవాలనుకుంటున్నారు?";
pub const ASK_OCCUPATION: &str = "మీ వృత్తి ఏమిటి? (రైతు, ఉద్యోగి, వ్యాపారి)";
pub const ASK_AGE: &str = "మీ వయస్సు ఎంత?";
pub const ASK_INCOME: &str = "మీ వార్షిక ఆదాయం ఎంత?";
pub const PROCESSING: &str = "మీ సమాచారం తనిఖీ చేస్తున్నాను...";
pub const ERROR: &str = "దోషం జరిగింది. దయచేసి మళ్లీ ప్రయత్నించండి.";
pub const THANK_YOU: &str = "ధన్యవాదాలు! మళ్లీ కలుద్దాం.";
pub const NOT_ELIGIBLE: &str = "క్షమించండి, మీరు ఏ పథకానికీ అర్హులు కాదు.";

const RECOMMENDATIONS_HEADER: &str = "మీకు సిఫార్సు చేస్తున్న పథకాలు:";
const BENEFITS_LABEL: &str = "లాభాలు";
const PRIORITY_LABEL: &str = "ప్రాధాన్యత";

/// Greeting followed by the first question.
pub fn opening() -> String {
    format!("{}\n{}", GREETING, ASK_OCCUPATION)
}

/// Ask the user which of two conflicting statements is true.
pub fn contradiction(old: &Fact, new: &Fact) -> String {
    format!(
        "క్షమించండి, మునుపు మీరు '{}' అన్నారు, ఇప్పుడు '{}' అంటున్నారు. ఏది నిజం?",
        old, new
    )
}

pub fn eligible_count(count: usize) -> String {
    format!("మీకు {} పథకాలు అర్హత ఉన్నాయి", count)
}

/// Numbered list of recommendations with benefits and priority.
pub fn recommendations(recommendations: &[Recommendation]) -> String {
    let mut response = format!("{}\n\n", RECOMMENDATIONS_HEADER);
    for (i, rec) in recommendations.iter().enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, rec.scheme.name));
        response.push_str(&format!("   {}: {}\n", BENEFITS_LABEL, rec.scheme.benefits));
        response.push_str(&format!("   {}: {}\n\n", PRIORITY_LABEL, rec.priority));
    }
    response
}
