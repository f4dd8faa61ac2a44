use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{builtin_schemes, Scheme, SchemeCatalog, PM_AWAS_ID, PM_KISAN_ID};
use crate::error::{AgentError, Result};

/// Phrases that end a conversation when said on their own.
pub const EXIT_PHRASES: &[&str] = &["ధన్యవాదాలు", "బై", "పూర్తి"];

/// Top-level configuration for the Sahayak agent.
///
/// Loaded from `~/.sahayak/config.toml` by default. Every section falls back
/// to its defaults when missing, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SahayakConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl SahayakConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SahayakConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Write the default configuration to `path` unless a file is already
    /// there. Returns whether a file was written.
    pub fn init(path: &Path) -> Result<bool> {
        if path.exists() {
            info!("Configuration already exists at {}", path.display());
            return Ok(false);
        }
        Self::default().save(path)?;
        Ok(true)
    }

    /// Build the validated scheme catalog described by `[catalog]`.
    pub fn scheme_catalog(&self) -> Result<SchemeCatalog> {
        SchemeCatalog::new(self.catalog.schemes.clone())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Conversation loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Number of recent interactions included in the end-of-run summary.
    pub history_window: usize,
    /// Consecutive listen failures tolerated before the loop gives up.
    pub max_listen_failures: u32,
    /// Exact phrases that end the conversation.
    pub exit_phrases: Vec<String>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            history_window: 5,
            max_listen_failures: 3,
            exit_phrases: EXIT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Weights and thresholds of the recommendation heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Scheme that gets the farmer bonus for farmers.
    pub farmer_scheme_id: String,
    /// Scheme that gets the senior bonus.
    pub housing_scheme_id: String,
    pub farmer_bonus: u32,
    pub low_income_bonus: u32,
    pub senior_housing_bonus: u32,
    /// Incomes strictly below this earn the low-income bonus.
    pub low_income_threshold: u64,
    /// Ages strictly above this earn the senior bonus.
    pub senior_age: u32,
    /// Number of recommendations returned.
    pub top_n: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            farmer_scheme_id: PM_KISAN_ID.to_string(),
            housing_scheme_id: PM_AWAS_ID.to_string(),
            farmer_bonus: 10,
            low_income_bonus: 5,
            senior_housing_bonus: 3,
            low_income_threshold: 50_000,
            senior_age: 60,
            top_n: 3,
        }
    }
}

/// Scheme catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub schemes: Vec<Scheme>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            schemes: builtin_schemes(),
        }
    }
}
