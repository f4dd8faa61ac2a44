//! Eligibility checking against the scheme catalog.

use tracing::debug;

use sahayak_core::catalog::{Scheme, SchemeCatalog};
use sahayak_core::types::UserProfile;

/// Filters the catalog down to the schemes a profile qualifies for.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    catalog: SchemeCatalog,
}

impl EligibilityEngine {
    pub fn new(catalog: SchemeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    /// Schemes the profile qualifies for, in catalog order.
    pub fn check(&self, profile: &UserProfile) -> Vec<Scheme> {
        let eligible: Vec<Scheme> = self
            .catalog
            .iter()
            .filter(|scheme| Self::is_eligible(scheme, profile))
            .cloned()
            .collect();
        debug!(
            eligible = eligible.len(),
            catalog = self.catalog.len(),
            "Eligibility checked"
        );
        eligible
    }

    /// Whether `profile` meets every constraint `scheme` declares.
    ///
    /// Unknown age and income count as 0; an unknown occupation only
    /// satisfies the `any` requirement.
    pub fn is_eligible(scheme: &Scheme, profile: &UserProfile) -> bool {
        if let Some(min_age) = scheme.min_age {
            if profile.age_or_default() < min_age {
                return false;
            }
        }
        if let Some(max_income) = scheme.max_income {
            if profile.income_or_default() > max_income {
                return false;
            }
        }
        scheme.occupation.admits(profile.occupation)
    }
}

// =============================================================================
// Tests
// =============================================================================
