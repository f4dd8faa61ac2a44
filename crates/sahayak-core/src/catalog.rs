//! Welfare scheme records and the read-only catalog they live in.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::types::Occupation;

/// Identifier of the farmer income-support scheme.
pub const PM_KISAN_ID: &str = "pm_kisan";
/// Identifier of the housing scheme.
pub const PM_AWAS_ID: &str = "pm_awas";
/// Identifier of the health insurance scheme.
pub const AYUSHMAN_ID: &str = "ayushman";

// =============================================================================
// OccupationRequirement
// =============================================================================

/// Occupation a scheme is restricted to, or the `any` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OccupationRequirement {
    #[default]
    Any,
    Only(Occupation),
}

impl OccupationRequirement {
    /// Whether an occupation (possibly unknown) satisfies this requirement.
    pub fn admits(&self, occupation: Option<Occupation>) -> bool {
        match self {
            OccupationRequirement::Any => true,
            OccupationRequirement::Only(required) => occupation == Some(*required),
        }
    }
}

impl fmt::Display for OccupationRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccupationRequirement::Any => write!(f, "any"),
            OccupationRequirement::Only(occupation) => write!(f, "{}", occupation.as_str()),
        }
    }
}

impl TryFrom<String> for OccupationRequirement {
    type Error = String;
    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("any") {
            return Ok(OccupationRequirement::Any);
        }
        value.parse().map(OccupationRequirement::Only)
    }
}

impl From<OccupationRequirement> for String {
    fn from(value: OccupationRequirement) -> Self {
        value.to_string()
    }
}

// =============================================================================
// Scheme
// =============================================================================

/// A welfare programme with its eligibility thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: String,
    pub name: String,
    /// Minimum age in years; absent means no age limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    /// Maximum annual income; absent means no income ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_income: Option<u64>,
    #[serde(default)]
    pub occupation: OccupationRequirement,
    pub benefits: String,
}

/// The schemes shipped with the agent, in presentation order.
pub fn builtin_schemes() -> Vec<Scheme> {
    vec![
        Scheme {
            id: PM_KISAN_ID.to_string(),
            name: "PM కిసాన్ సమ్మాన్ నిధి".to_string(),
            min_age: Some(18),
            max_income: Some(100_000),
            occupation: OccupationRequirement::Only(Occupation::Farmer),
            benefits: "సంవత్సరానికి ₹6000".to_string(),
        },
        Scheme {
            id: PM_AWAS_ID.to_string(),
            name: "ప్రధానమంత్రి ఆవాస్ యోజన".to_string(),
            min_age: Some(21),
            max_income: Some(300_000),
            occupation: OccupationRequirement::Any,
            benefits: "గృహలోన్ సబ్సిడీ".to_string(),
        },
        Scheme {
            id: AYUSHMAN_ID.to_string(),
            name: "ఆయుష్మాన్ భారత్".to_string(),
            min_age: Some(21),
            max_income: Some(500_000),
            occupation: OccupationRequirement::Any,
            benefits: "₹5 లక్షల ఆరోగ్య బీమా".to_string(),
        },
    ]
}

// =============================================================================
// SchemeCatalog
// =============================================================================

/// Immutable, ordered list of schemes.
///
/// Cloning is cheap and every clone shares the same records, so several
/// conversations can read one catalog.
#[derive(Debug, Clone)]
pub struct SchemeCatalog {
    schemes: Arc<[Scheme]>,
}

impl SchemeCatalog {
    /// Build a catalog, rejecting empty or duplicate scheme ids.
    pub fn new(schemes: Vec<Scheme>) -> Result<Self> {
        let mut seen = HashSet::new();
        for scheme in &schemes {
            if scheme.id.trim().is_empty() {
                return Err(AgentError::Catalog(format!(
                    "scheme '{}' has an empty id",
                    scheme.name
                )));
            }
            if !seen.insert(scheme.id.as_str()) {
                return Err(AgentError::Catalog(format!(
                    "duplicate scheme id: {}",
                    scheme.id
                )));
            }
        }
        tracing::debug!(schemes = schemes.len(), "Scheme catalog loaded");
        Ok(Self {
            schemes: schemes.into(),
        })
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            schemes: builtin_schemes().into(),
        }
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scheme> {
        self.schemes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Tests
// =============================================================================
