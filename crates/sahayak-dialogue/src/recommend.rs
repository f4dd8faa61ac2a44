//! Ranking of eligible schemes.
//!
//! Each scheme gets an integer score from a few weighted rules (farmer
//! scheme for farmers, low income, seniors for housing). The score maps to
//! a three-tier priority label, and the top entries are returned.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use sahayak_core::catalog::Scheme;
use sahayak_core::config::RecommendConfig;
use sahayak_core::types::{Occupation, UserProfile};

/// Scores at or above this are highest priority.
pub const HIGHEST_PRIORITY_SCORE: u32 = 10;
/// Scores at or above this are medium priority.
pub const MEDIUM_PRIORITY_SCORE: u32 = 5;

// =============================================================================
// Priority
// =============================================================================

/// Priority bucket derived from a recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Highest,
    Medium,
    Normal,
}

impl Priority {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGHEST_PRIORITY_SCORE {
            Priority::Highest
        } else if score >= MEDIUM_PRIORITY_SCORE {
            Priority::Medium
        } else {
            Priority::Normal
        }
    }

    /// Label read out to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Highest => "అత్యధిక ప్రాధాన్యత",
            Priority::Medium => "మధ్యస్థ ప్రాధాన్యత",
            Priority::Normal => "సాధారణ ప్రాధాన్యత",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scored, labelled scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub scheme: Scheme,
    pub score: u32,
    pub priority: Priority,
}

// =============================================================================
// RecommendationEngine
// =============================================================================

/// Scores eligible schemes and keeps the best few.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Score one scheme for a profile. Saturates at `u32::MAX`.
    pub fn score(&self, scheme: &Scheme, profile: &UserProfile) -> u32 {
        let cfg = &self.config;
        let mut score: u32 = 0;

        if scheme.id == cfg.farmer_scheme_id && profile.occupation == Some(Occupation::Farmer) {
            score = score.saturating_add(cfg.farmer_bonus);
        }
        if profile.income_or_default() < cfg.low_income_threshold {
            score = score.saturating_add(cfg.low_income_bonus);
        }
        if profile.age_or_default() > cfg.senior_age && scheme.id == cfg.housing_scheme_id {
            score = score.saturating_add(cfg.senior_housing_bonus);
        }

        score
    }

    /// Rank `eligible` by score, highest first, and keep the top `top_n`.
    ///
    /// Equal scores keep their input order.
    pub fn recommend(&self, eligible: &[Scheme], profile: &UserProfile) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = eligible
            .iter()
            .map(|scheme| {
                let score = self.score(scheme, profile);
                Recommendation {
                    scheme: scheme.clone(),
                    score,
                    priority: Priority::from_score(score),
                }
            })
            .collect();

        recommendations.sort_by(|a, b| b.score.cmp(&a.score));
        recommendations.truncate(self.config.top_n);

        debug!(
            candidates = eligible.len(),
            returned = recommendations.len(),
            "Recommendations ranked"
        );
        recommendations
    }
}

// =============================================================================
// Tests
// =============================================================================
